//! World plugin: the walled arena that player and projectiles collide with.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;

const TILE: i32 = 64;
const HALF_W: f32 = (TILE * 16) as f32;
const HALF_H: f32 = (TILE * 9) as f32;
const WALL_THICKNESS: f32 = 30.0;

/// One arena wall: name, centre, size.
struct WallSpec {
    name: &'static str,
    center: Vec2,
    size: Vec2,
}

/// The four walls enclosing `[-HALF_W, HALF_W] x [-HALF_H, HALF_H]`.
fn arena_walls() -> [WallSpec; 4] {
    let t = WALL_THICKNESS;
    let horizontal = Vec2::new(HALF_W * 2.0 + t * 2.0, t);
    let vertical = Vec2::new(t, HALF_H * 2.0);

    [
        WallSpec { name: "WallTop", center: Vec2::new(0.0, HALF_H + t * 0.5), size: horizontal },
        WallSpec { name: "WallBottom", center: Vec2::new(0.0, -HALF_H - t * 0.5), size: horizontal },
        WallSpec { name: "WallLeft", center: Vec2::new(-HALF_W - t * 0.5, 0.0), size: vertical },
        WallSpec { name: "WallRight", center: Vec2::new(HALF_W + t * 0.5, 0.0), size: vertical },
    ]
}

#[inline]
pub fn wall_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::PlayerBullet])
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_floor));
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);

    for wall in arena_walls() {
        commands.spawn((
            Name::new(wall.name),
            Sprite {
                color: wall_color,
                custom_size: Some(wall.size),
                ..default()
            },
            Transform::from_translation(wall.center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(wall.size.x, wall.size.y),
            wall_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Checkerboard floor of solid-color sprites; purely visual.
fn spawn_floor(mut commands: Commands) {
    let (nx, ny) = (HALF_W as i32 / TILE, HALF_H as i32 / TILE);

    for (x, y) in (-ny..=ny).flat_map(|y| (-nx..=nx).map(move |x| (x, y))) {
        let color = if (x + y) % 2 == 0 {
            Color::srgb(0.14, 0.14, 0.16)
        } else {
            Color::srgb(0.12, 0.12, 0.14)
        };

        commands.spawn((
            Sprite::from_color(color, Vec2::splat(TILE as f32)),
            Transform::from_xyz((x * TILE) as f32, (y * TILE) as f32, 0.0),
            DespawnOnExit(GameState::InGame),
        ));
    }
}
