//! Timed upgrades.
//!
//! ```text
//! FixedPostUpdate (after CollisionEventSystems): player x pickup -> CollectUpgrade<E>
//! FixedUpdate (SimSet::Upgrades), per category E:
//!   collect  -> UpgradeManager<E>::collect + effect.activate(current targets)
//!   reapply  -> on ProjectileSpawned, every active projectile effect again
//!   expire   -> UpgradeManager<E>::sweep_expired, deactivate before removal
//! ```

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::schedule::SimSet;
use crate::common::state::{GameState, RunState};

pub mod effect;
pub mod manager;
pub mod messages;
pub mod pickups;
pub mod systems;

pub use effect::{AnyUpgrade, PlayerEffect, ProjectileEffect, UpgradeDef, WeaponEffect};
pub use manager::{ActiveUpgrade, UpgradeManager};
pub use messages::CollectUpgrade;
pub use pickups::{UpgradeCatalog, UpgradePickup};

pub fn plugin(app: &mut App) {
    app.init_resource::<UpgradeManager<WeaponEffect>>()
        .init_resource::<UpgradeManager<ProjectileEffect>>()
        .init_resource::<UpgradeManager<PlayerEffect>>()
        .init_resource::<UpgradeCatalog>()
        .add_message::<CollectUpgrade<WeaponEffect>>()
        .add_message::<CollectUpgrade<ProjectileEffect>>()
        .add_message::<CollectUpgrade<PlayerEffect>>()
        .add_systems(OnEnter(GameState::InGame), pickups::spawn_pickups)
        .add_systems(
            FixedUpdate,
            (
                systems::collect_weapon_upgrades,
                systems::collect_projectile_upgrades,
                systems::collect_player_upgrades,
                systems::reapply_projectile_upgrades,
                systems::expire_weapon_upgrades,
                systems::expire_projectile_upgrades,
                systems::expire_player_upgrades,
            )
                .chain()
                .in_set(SimSet::Upgrades),
        )
        .add_systems(
            FixedPostUpdate,
            pickups::collect_pickups
                .after(CollisionEventSystems)
                .run_if(in_state(RunState::Running)),
        );
}
