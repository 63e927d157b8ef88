fn main() {
    arena_core::game::run();
}
