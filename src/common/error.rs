//! Configuration errors.
//!
//! Nothing in the fixed tick returns these: invalid configuration is caught
//! when entities are built, logged, and the offending entity is left inert.

use std::fmt;

use crate::plugins::weapons::WeaponKind;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A weapon has no emission point to fire from.
    MissingMuzzle { weapon: WeaponKind },

    /// A spread weapon needs one muzzle per barrel.
    TooFewMuzzles {
        weapon: WeaponKind,
        got: usize,
        required: usize,
    },

    /// A duration, speed or rate that must be strictly positive is not.
    NonPositive { name: &'static str, value: f32 },

    /// A value is not finite or lies outside `min..max`.
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// The tunables document could not be parsed.
    Parse { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingMuzzle { weapon } => {
                write!(f, "weapon {weapon:?} has no muzzle point")
            }
            ConfigError::TooFewMuzzles {
                weapon,
                got,
                required,
            } => write!(
                f,
                "weapon {weapon:?} has {got} muzzle points, needs at least {required}"
            ),
            ConfigError::NonPositive { name, value } => {
                write!(f, "'{name}' must be > 0, got {value}")
            }
            ConfigError::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "'{name}' must be in {min}..{max}, got {value}"),
            ConfigError::Parse { message } => write!(f, "invalid tunables: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Returns an error unless `value` is strictly positive.
pub fn ensure_positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

/// Returns an error unless `min <= value < max`. NaN is always rejected.
pub fn ensure_in_range(name: &'static str, value: f32, min: f32, max: f32) -> ConfigResult<()> {
    if (min..max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
