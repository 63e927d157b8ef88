//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()` after
//! running so queued commands are applied before assertions.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A generic clock whose last step was `dt` seconds long and ended at `elapsed`.
///
/// In `FixedUpdate` systems `Res<Time>` is the fixed clock; tests insert this instead.
pub fn clock_at(elapsed: f32, dt: f32) -> Time {
    let mut t = Time::<()>::default();
    t.advance_to(Duration::from_secs_f32((elapsed - dt).max(0.0)));
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

/// Replace the world's clock.
pub fn set_clock(world: &mut World, elapsed: f32, dt: f32) {
    world.insert_resource(clock_at(elapsed, dt));
}
