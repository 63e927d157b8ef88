use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::common::state::{GameState, RunState};
use crate::common::tunables::Tunables;
use crate::plugins::core;

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>().add_sub_state::<RunState>();
    app
}

#[test]
fn inserts_resources() {
    let mut app = app();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn keeps_tunables_inserted_before_it() {
    let mut app = app();
    app.insert_resource(Tunables {
        roll_duration: 0.25,
        ..default()
    });
    core::plugin(&mut app);
    assert_eq!(app.world().resource::<Tunables>().roll_duration, 0.25);
}

#[test]
fn escape_toggles_pause() {
    let mut app = app();
    app.init_resource::<ButtonInput<KeyCode>>();
    core::plugin(&mut app);
    app.update();
    assert_eq!(*app.world().resource::<State<RunState>>().get(), RunState::Running);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Escape);
    app.update();
    // No InputPlugin here to clear the edge.
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    app.update();
    assert_eq!(*app.world().resource::<State<RunState>>().get(), RunState::Paused);
}
