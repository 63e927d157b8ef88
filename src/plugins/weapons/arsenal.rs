use bevy::prelude::*;

use crate::common::tunables::WeaponConfig;
use crate::plugins::player::Locomotion;

use super::weapon::{Release, Weapon};
use super::WeaponKind;

/// The weapons a player carries. At most one is equipped (active) at a time.
#[derive(Component, Debug, Clone, Default)]
pub struct Arsenal {
    weapons: Vec<Weapon>,
    equipped: Option<usize>,
}

impl Arsenal {
    /// The first weapon is the default and starts equipped.
    pub fn new(mut weapons: Vec<Weapon>) -> Self {
        let equipped = if weapons.is_empty() { None } else { Some(0) };
        if let Some(first) = weapons.first_mut() {
            first.set_active(true);
        }
        Self { weapons, equipped }
    }

    pub fn from_configs(configs: &[WeaponConfig]) -> Self {
        Self::new(configs.iter().map(Weapon::from_config).collect())
    }

    pub fn equipped(&self) -> Option<&Weapon> {
        self.equipped.map(|i| &self.weapons[i])
    }

    pub fn equipped_mut(&mut self) -> Option<&mut Weapon> {
        self.equipped.map(|i| &mut self.weapons[i])
    }

    pub fn default_kind(&self) -> Option<WeaponKind> {
        self.weapons.first().map(Weapon::kind)
    }

    pub fn get(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.kind() == kind)
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn weapons_mut(&mut self) -> impl Iterator<Item = &mut Weapon> {
        self.weapons.iter_mut()
    }

    /// Make `kind` the active weapon.
    ///
    /// The previously equipped weapon is released first, so a charge in progress
    /// is cancelled and the holder's speed restored. Returns how the old weapon
    /// was released, or `None` if nothing changed (unknown kind or already equipped).
    pub fn equip(&mut self, kind: WeaponKind, holder: &mut Locomotion) -> Option<Release> {
        let next = self.weapons.iter().position(|w| w.kind() == kind)?;
        if self.equipped == Some(next) {
            return None;
        }

        let release = match self.equipped {
            Some(prev) => {
                let weapon = &mut self.weapons[prev];
                let release = weapon.stop_firing(holder);
                weapon.set_active(false);
                release
            }
            None => Release::Ignored,
        };

        self.weapons[next].set_active(true);
        self.equipped = Some(next);
        info!("Equipped {kind:?}");
        Some(release)
    }
}
