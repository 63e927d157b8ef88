use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::RunState;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));

    app.add_systems(OnEnter(RunState::Paused), pause_simulation_clock)
        .add_systems(OnExit(RunState::Paused), resume_simulation_clock);
}

/// Stops the virtual clock, which also stops the fixed and physics clocks.
/// Time spent paused never counts towards rolls, cooldowns or upgrade lifetimes.
fn pause_simulation_clock(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_simulation_clock(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}
