//! Core plugin: shared resources, global settings and the pause toggle.

use bevy::prelude::*;

use crate::common::schedule;
use crate::common::state::RunState;
use crate::common::tunables::{Tunables, TUNABLES_PATH};

pub fn plugin(app: &mut App) {
    // Inserted at build time: the physics plugin reads it while building.
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::load_or_default(TUNABLES_PATH));
    }
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    schedule::configure(app);
    app.add_systems(Update, toggle_pause);
}

fn toggle_pause(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    state: Option<Res<State<RunState>>>,
    mut next: ResMut<NextState<RunState>>,
) {
    let (Some(keys), Some(state)) = (keys, state) else {
        return;
    };
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    let target = match state.get() {
        RunState::Running => RunState::Paused,
        RunState::Paused => RunState::Running,
    };
    info!("Run state -> {target:?}");
    next.set(target);
}

#[cfg(test)]
mod tests;
