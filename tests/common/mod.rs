//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `arena_core::game::configure_headless` installs the gameplay plugins.
//! - every `app.update()` advances time by exactly one fixed tick.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use arena_core::plugins::player::Player;

pub const TICK: Duration = Duration::from_micros(15_625);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(Time::<Fixed>::from_duration(TICK));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    arena_core::game::configure_headless(&mut app);
    // `App::run` normally drives these; tests call `update()` directly, so
    // finish plugin setup here (avian registers its diagnostics resources in `finish`).
    app.finish();
    app.cleanup();
    app
}

/// Booted app with the arena spawned.
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.update();
    app.update();
    app
}

pub fn step(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("exactly one player")
}
