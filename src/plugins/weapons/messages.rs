//! Weapon notifications and requests.
//!
//! Weapons report through messages instead of callbacks; anything (audio, HUD,
//! tests) can read them without the weapon knowing.

use bevy::prelude::*;

use super::WeaponKind;

/// A weapon discharged this tick.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ShotFired {
    pub weapon: WeaponKind,
    pub projectiles: usize,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChargeStarted {
    pub weapon: WeaponKind,
}

/// The charge was released, fired or not.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChargeStopped {
    pub weapon: WeaponKind,
}

/// Ask the player's arsenal to switch weapons.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipWeapon(pub WeaponKind);
