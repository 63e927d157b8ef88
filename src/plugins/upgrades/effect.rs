//! Upgrade definitions and what each effect does to its targets.
//!
//! One effect enum per target category. Every effect can `activate` and
//! `deactivate`; only projectile effects can `reapply`, because projectiles are
//! the only targets that keep appearing after an upgrade was collected.
//!
//! Targets are passed in fresh on every call. Nothing here caches entities.

use std::ops::DerefMut;
use std::sync::Arc;

use crate::plugins::player::Locomotion;
use crate::plugins::projectiles::{Projectile, WallPolicy};
use crate::plugins::weapons::{Arsenal, Release, Weapon, WeaponKind};

/// Immutable template shared by every pickup and activation of one upgrade.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeDef<E> {
    pub name: String,
    pub duration_secs: f32,
    pub effect: E,
}

impl<E> UpgradeDef<E> {
    pub fn new(name: impl Into<String>, duration_secs: f32, effect: E) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            duration_secs,
            effect,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeaponEffect {
    /// Scale every weapon's current cooldown, never below `minimum_cooldown`.
    FireRate {
        multiplier: f32,
        minimum_cooldown: f32,
    },
}

impl WeaponEffect {
    pub fn activate<W: DerefMut<Target = Weapon>>(&self, weapons: impl IntoIterator<Item = W>) {
        match *self {
            WeaponEffect::FireRate {
                multiplier,
                minimum_cooldown,
            } => {
                for mut weapon in weapons {
                    let scaled = weapon.cooldown() * multiplier;
                    weapon.set_cooldown(scaled.max(minimum_cooldown));
                }
            }
        }
    }

    /// Restores base cooldowns, including ones scaled by a still-active upgrade.
    pub fn deactivate<W: DerefMut<Target = Weapon>>(&self, weapons: impl IntoIterator<Item = W>) {
        match self {
            WeaponEffect::FireRate { .. } => {
                for mut weapon in weapons {
                    weapon.reset_cooldown();
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileEffect {
    /// Projectiles bounce off walls instead of being destroyed.
    Bouncing,
}

impl ProjectileEffect {
    pub fn activate<P: DerefMut<Target = Projectile>>(&self, projectiles: impl IntoIterator<Item = P>) {
        match self {
            ProjectileEffect::Bouncing => {
                for mut projectile in projectiles {
                    projectile.set_wall_policy(WallPolicy::Bounce);
                }
            }
        }
    }

    /// Bring projectiles spawned since activation under the effect. Idempotent.
    pub fn reapply<P: DerefMut<Target = Projectile>>(&self, projectiles: impl IntoIterator<Item = P>) {
        self.activate(projectiles);
    }

    pub fn deactivate<P: DerefMut<Target = Projectile>>(&self, projectiles: impl IntoIterator<Item = P>) {
        match self {
            ProjectileEffect::Bouncing => {
                for mut projectile in projectiles {
                    projectile.reset_wall_policy();
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEffect {
    /// Equip `weapon` for the duration; the default weapon comes back afterwards.
    ChangeWeapon { weapon: WeaponKind },
}

impl PlayerEffect {
    /// Returns how the previously equipped weapon was released, if a switch happened.
    pub fn activate(&self, arsenal: &mut Arsenal, holder: &mut Locomotion) -> Option<Release> {
        match *self {
            PlayerEffect::ChangeWeapon { weapon } => arsenal.equip(weapon, holder),
        }
    }

    pub fn deactivate(&self, arsenal: &mut Arsenal, holder: &mut Locomotion) -> Option<Release> {
        match self {
            PlayerEffect::ChangeWeapon { .. } => {
                let default = arsenal.default_kind()?;
                arsenal.equip(default, holder)
            }
        }
    }
}

/// An upgrade of any category, as carried by pickups and the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyUpgrade {
    Weapon(Arc<UpgradeDef<WeaponEffect>>),
    Projectile(Arc<UpgradeDef<ProjectileEffect>>),
    Player(Arc<UpgradeDef<PlayerEffect>>),
}

impl AnyUpgrade {
    pub fn name(&self) -> &str {
        match self {
            AnyUpgrade::Weapon(def) => &def.name,
            AnyUpgrade::Projectile(def) => &def.name,
            AnyUpgrade::Player(def) => &def.name,
        }
    }
}
