//! Top-down arena gameplay core: player locomotion, weapons, projectiles and
//! timed upgrades, as Bevy plugins.
//!
//! Integration tests in `tests/` are compiled as separate crates.
//! A `lib.rs` gives them a stable public API surface to import.

pub mod common;
pub mod game;
pub mod plugins;
