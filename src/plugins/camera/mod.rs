//! Camera plugin (render-only).
//!
//! A system cannot hold `Query<&Transform>` and `Query<&mut Transform>` at once
//! unless Bevy can prove the queries are disjoint, so both carry `Without<...>`
//! filters.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      follow_player, eased towards the player, before transform propagation
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera {
    /// Higher is snappier; 1/responsiveness is roughly the catch-up time in seconds.
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else { return; };
    let Ok((mut tf_cam, main_cam)) = q_cam.single_mut() else { return; };

    let alpha = 1.0 - (-main_cam.responsiveness * time.delta_secs()).exp();
    let target = tf_player.translation.truncate();
    let eased = tf_cam.translation.truncate().lerp(target, alpha);

    tf_cam.translation.x = eased.x;
    tf_cam.translation.y = eased.y;
}
