//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input into `PlayerIntent`, cursor into `Aim`
//! - FixedUpdate:
//!   - `SimSet::Roll`: copy intent, face the aim point, advance/start the roll
//!   - `SimSet::Knockback`: decay knockback
//!   - `SimSet::Movement`: write the locomotion velocity to the kinematic body
//!
//! Roll presses and trigger releases are latched in `PlayerIntent` and consumed by
//! the next fixed tick, so a press between two ticks is never lost.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::{player_default_layers, player_roll_layers};
use crate::common::schedule::SimSet;
use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::camera::MainCamera;
use crate::plugins::weapons::Arsenal;

pub mod locomotion;

pub use locomotion::{Locomotion, LocomotionState, RollProgress};

#[derive(Component)]
pub struct Player;

/// Intent sampled once per frame.
#[derive(Resource, Default, Debug)]
pub struct PlayerIntent {
    pub move_axis: Vec2,
    /// Latched until a fixed tick consumes it.
    pub roll_requested: bool,
    pub fire_held: bool,
    /// Latched until a fixed tick consumes it.
    pub fire_released: bool,
}

/// World point the player aims at. `None` while the cursor is outside the window.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct Aim {
    pub world_point: Option<Vec2>,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerIntent::default())
        .insert_resource(Aim::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, (gather_input, update_aim_from_cursor))
        .add_systems(FixedUpdate, resolve_roll.in_set(SimSet::Roll))
        .add_systems(FixedUpdate, decay_knockback.in_set(SimSet::Knockback))
        .add_systems(FixedUpdate, apply_movement.in_set(SimSet::Movement));
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("Player"),
        Player,
        Locomotion::default(),
        Arsenal::from_configs(&tunables.weapons),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(26.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        RigidBody::Kinematic,
        Collider::circle(13.0),
        player_default_layers(),
        LinearVelocity::ZERO,
        // Pickups are sensors; the player reports the overlap.
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut intent: ResMut<PlayerIntent>,
) {
    if let Some(keys) = keys {
        let mut axis = Vec2::ZERO;

        if keys.pressed(KeyCode::KeyW) {
            axis.y += 1.0;
        }
        if keys.pressed(KeyCode::KeyS) {
            axis.y -= 1.0;
        }
        if keys.pressed(KeyCode::KeyA) {
            axis.x -= 1.0;
        }
        if keys.pressed(KeyCode::KeyD) {
            axis.x += 1.0;
        }

        intent.move_axis = axis.normalize_or_zero();

        if keys.just_pressed(KeyCode::Space) {
            intent.roll_requested = true;
        }
    }

    if let Some(buttons) = buttons {
        intent.fire_held = buttons.pressed(MouseButton::Left);
        if buttons.just_released(MouseButton::Left) {
            intent.fire_released = true;
        }
    }
}

fn update_aim_from_cursor(
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut aim: ResMut<Aim>,
) {
    let Ok(window) = windows.single() else { return; };
    let Ok((camera, camera_tf)) = q_camera.single() else { return; };

    aim.world_point = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_tf, cursor).ok());
}

fn resolve_roll(
    time: Res<Time>,
    tunables: Res<Tunables>,
    aim: Res<Aim>,
    mut intent: ResMut<PlayerIntent>,
    mut q_player: Query<(&Transform, &mut Locomotion, &mut CollisionLayers), With<Player>>,
) {
    let roll_requested = std::mem::take(&mut intent.roll_requested);

    let Ok((tf, mut loco, mut layers)) = q_player.single_mut() else {
        return;
    };
    let now = time.elapsed_secs();

    loco.set_movement_intent(intent.move_axis);
    if let Some(target) = aim.world_point {
        loco.face_towards(tf.translation.truncate(), target);
    }

    if loco.update_roll(now, tunables.roll_duration) == RollProgress::Ended {
        *layers = player_default_layers();
        debug!("Roll ended");
    }

    if roll_requested && loco.try_start_roll(now) {
        *layers = player_roll_layers();
        debug!("Roll started towards {:?}", loco.state());
    }
}

fn decay_knockback(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q_player: Query<&mut Locomotion, With<Player>>,
) {
    let dt = time.delta_secs();
    for mut loco in &mut q_player {
        loco.decay_knockback(
            tunables.knockback_recover_rate,
            dt,
            tunables.knockback_snap_epsilon,
        );
    }
}

fn apply_movement(
    tunables: Res<Tunables>,
    mut q_player: Query<(&Locomotion, &mut LinearVelocity, &mut Transform), With<Player>>,
) {
    let Ok((loco, mut vel, mut tf)) = q_player.single_mut() else {
        return;
    };
    vel.0 = loco.velocity(tunables.player_speed, tunables.roll_speed);
    tf.rotation = Quat::from_rotation_z(loco.facing().to_angle());
}

#[cfg(test)]
mod tests;
