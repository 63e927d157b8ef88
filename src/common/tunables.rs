//! Tunable gameplay constants.
//!
//! Every field has a compiled default. `assets/tunables.toml` may override any
//! subset of them; missing keys keep their defaults.
//!
//! ```toml
//! roll_duration = 0.6
//!
//! [[weapons]]
//! kind = "Basic"
//! cooldown = 0.15
//! muzzles = [[18.0, 0.0]]
//! projectile_speed = 900.0
//! projectile_damage = 1
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::error::{ensure_in_range, ensure_positive, ConfigError, ConfigResult};
use crate::plugins::weapons::WeaponKind;

pub const TUNABLES_PATH: &str = "assets/tunables.toml";

/// Spread half-angle must stay below this.
const MAX_SPREAD_DEGREES: f32 = 180.0;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    pub roll_speed: f32,
    /// Seconds a dodge-roll lasts.
    pub roll_duration: f32,
    /// Fraction of the knockback velocity removed per second.
    pub knockback_recover_rate: f32,
    /// Knockback slower than this snaps to zero.
    pub knockback_snap_epsilon: f32,
    pub projectile_lifetime: f32,
    /// Loadout, in equip order. The first entry is the default weapon.
    pub weapons: Vec<WeaponConfig>,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 420.0,
            roll_speed: 420.0,
            roll_duration: 1.0,
            knockback_recover_rate: 0.2,
            knockback_snap_epsilon: 13.0,
            projectile_lifetime: 3.0,
            weapons: vec![
                WeaponConfig {
                    kind: WeaponKind::Basic,
                    cooldown: 0.2,
                    muzzles: vec![[18.0, 0.0]],
                    projectile_speed: 900.0,
                    projectile_damage: 1,
                    pattern: FirePattern::Single,
                },
                WeaponConfig {
                    kind: WeaponKind::Shotgun,
                    cooldown: 0.8,
                    muzzles: vec![[18.0, 6.0], [18.0, -6.0]],
                    projectile_speed: 800.0,
                    projectile_damage: 1,
                    pattern: FirePattern::Spread {
                        bullets_per_barrel: 2,
                        spread_degrees: 10.0,
                        knockback: 420.0,
                    },
                },
                WeaponConfig {
                    kind: WeaponKind::Charge,
                    cooldown: 1.5,
                    muzzles: vec![[20.0, 0.0]],
                    projectile_speed: 1400.0,
                    projectile_damage: 10,
                    pattern: FirePattern::Charge {
                        knockback: 420.0,
                        speed_modifier_on_charge: 0.1,
                    },
                },
            ],
        }
    }
}

impl Tunables {
    /// Parse a TOML document on top of the defaults and validate the result.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let tunables: Tunables = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        tunables.validate()?;
        Ok(tunables)
    }

    /// Load `path`, falling back to the defaults when the file is missing or
    /// invalid. Problems are logged, never fatal.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(contents) = std::fs::read_to_string(path) else {
            debug!("No {} found; using compiled tunables", path.display());
            return Self::default();
        };

        match Self::from_toml_str(&contents) {
            Ok(tunables) => {
                info!("Loaded tunables from {}", path.display());
                tunables
            }
            Err(e) => {
                warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Global values only; weapons are validated one by one when the arsenal
    /// is built so a single bad weapon does not discard the whole file.
    pub fn validate(&self) -> ConfigResult<()> {
        ensure_positive("pixels_per_meter", self.pixels_per_meter)?;
        ensure_positive("player_speed", self.player_speed)?;
        ensure_positive("roll_speed", self.roll_speed)?;
        ensure_positive("roll_duration", self.roll_duration)?;
        ensure_positive("knockback_recover_rate", self.knockback_recover_rate)?;
        ensure_positive("projectile_lifetime", self.projectile_lifetime)?;
        Ok(())
    }

    pub fn weapon(&self, kind: WeaponKind) -> Option<&WeaponConfig> {
        self.weapons.iter().find(|w| w.kind == kind)
    }
}

/// One weapon of the loadout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeaponConfig {
    pub kind: WeaponKind,
    /// Seconds between shots; for charge weapons, the required charge time.
    pub cooldown: f32,
    /// Emission points in the weapon frame (+X points where the player faces).
    pub muzzles: Vec<[f32; 2]>,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    #[serde(default)]
    pub pattern: FirePattern,
}

impl WeaponConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.muzzles.is_empty() {
            return Err(ConfigError::MissingMuzzle { weapon: self.kind });
        }
        if matches!(self.pattern, FirePattern::Spread { .. }) && self.muzzles.len() < 2 {
            return Err(ConfigError::TooFewMuzzles {
                weapon: self.kind,
                got: self.muzzles.len(),
                required: 2,
            });
        }
        ensure_positive("cooldown", self.cooldown)?;
        ensure_positive("projectile_speed", self.projectile_speed)?;

        match self.pattern {
            FirePattern::Single => {}
            FirePattern::Spread {
                spread_degrees,
                knockback,
                ..
            } => {
                ensure_in_range("spread_degrees", spread_degrees.abs(), 0.0, MAX_SPREAD_DEGREES)?;
                ensure_in_range("knockback", knockback, 0.0, f32::INFINITY)?;
            }
            FirePattern::Charge {
                knockback,
                speed_modifier_on_charge,
            } => {
                ensure_in_range("knockback", knockback, 0.0, f32::INFINITY)?;
                ensure_in_range("speed_modifier_on_charge", speed_modifier_on_charge, 0.0, f32::INFINITY)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FirePattern {
    #[default]
    Single,
    Spread {
        bullets_per_barrel: u32,
        spread_degrees: f32,
        knockback: f32,
    },
    Charge {
        knockback: f32,
        speed_modifier_on_charge: f32,
    },
}
