//! Fixed-tick ordering.
//!
//! ```text
//! FixedUpdate (RunState::Running only)
//!   Roll -> Knockback -> Movement -> Weapons -> Projectiles -> Upgrades
//! ```
//!
//! Weapons read locomotion state after it has been updated for the tick, so a
//! roll that starts this tick already blocks firing.

use bevy::prelude::*;

use super::state::RunState;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Roll,
    Knockback,
    Movement,
    Weapons,
    Projectiles,
    Upgrades,
}

pub fn configure(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SimSet::Roll,
            SimSet::Knockback,
            SimSet::Movement,
            SimSet::Weapons,
            SimSet::Projectiles,
            SimSet::Upgrades,
        )
            .chain()
            .run_if(in_state(RunState::Running)),
    );
}
