//! Weapons plugin.
//!
//! ```text
//! Update:       debug hotkeys -> EquipWeapon
//! FixedUpdate (SimSet::Weapons):
//!   apply_equip_requests -> fire_equipped_weapon
//!     writes SpawnProjectile / ShotFired / ChargeStarted / ChargeStopped
//! OnEnter(RunState::Paused): release_trigger_on_pause
//! ```
//!
//! The weapon logic itself lives in [`weapon`] and knows nothing about the ECS.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::common::schedule::SimSet;
use crate::common::state::{GameState, RunState};

pub mod arsenal;
pub mod messages;
pub mod systems;
pub mod weapon;

pub use arsenal::Arsenal;
pub use messages::{ChargeStarted, ChargeStopped, EquipWeapon, ShotFired};
pub use weapon::{ChargePhase, FireOutcome, Pose, Release, Shot, Weapon};

/// Identifies a weapon of the loadout; names match the tunables file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum WeaponKind {
    Basic,
    Shotgun,
    Charge,
}

/// Randomness for spread patterns. Seed it in tests for repeatable shots.
#[derive(Resource)]
pub struct WeaponRng(pub StdRng);

impl WeaponRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for WeaponRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<WeaponRng>()
        .add_message::<ShotFired>()
        .add_message::<ChargeStarted>()
        .add_message::<ChargeStopped>()
        .add_message::<EquipWeapon>()
        .add_systems(
            Update,
            systems::equip_hotkeys.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            (systems::apply_equip_requests, systems::fire_equipped_weapon)
                .chain()
                .in_set(SimSet::Weapons),
        )
        .add_systems(OnEnter(RunState::Paused), systems::release_trigger_on_pause);
}
