//! Projectiles plugin: message-based spawning, flight, lifetime and wall policy.
//!
//! ```text
//! FixedUpdate (SimSet::Projectiles)
//!   spawn_projectiles       SpawnProjectile -> entity + ProjectileSpawned
//!   drive_projectiles       Projectile.direction * speed -> LinearVelocity
//!   expire_projectiles      Lifetime elapsed -> despawn
//!
//! FixedPostUpdate (after CollisionEventSystems, RunState::Running)
//!   detect_wall_contacts    CollisionStart(projectile, World) -> WallContact
//!   resolve_wall_contacts   Destroy -> despawn, Bounce -> reflect direction
//! ```
//!
//! Producers never spawn projectile entities themselves; they write
//! `SpawnProjectile` and this plugin is the single consumer. Upgrades hook in
//! through `ProjectileSpawned`, which is written once per new projectile.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::schedule::SimSet;
use crate::common::state::RunState;

pub mod collision;
pub mod components;
pub mod messages;
pub mod systems;

pub use components::{Lifetime, Projectile, WallPolicy};
pub use messages::{ProjectileSpawned, SpawnProjectile, WallContact};

pub fn plugin(app: &mut App) {
    app.add_message::<SpawnProjectile>()
        .add_message::<ProjectileSpawned>()
        .add_message::<WallContact>()
        .add_systems(
            FixedUpdate,
            (
                systems::spawn_projectiles,
                systems::drive_projectiles,
                systems::expire_projectiles,
            )
                .chain()
                .in_set(SimSet::Projectiles),
        )
        .add_systems(
            FixedPostUpdate,
            (collision::detect_wall_contacts, collision::resolve_wall_contacts)
                .chain()
                .after(CollisionEventSystems)
                .run_if(in_state(RunState::Running)),
        );
}

#[cfg(test)]
mod tests;
