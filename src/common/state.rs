//! Global state machine.
//!
//! `GameState::InGame` owns every gameplay entity (they despawn on exit).
//! `RunState` is the "simulation is running" gate inside it: pausing stops the
//! fixed tick without tearing the arena down.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, SubStates, Default)]
#[source(GameState = GameState::InGame)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}
