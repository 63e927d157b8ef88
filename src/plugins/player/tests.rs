use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{player_default_layers, player_roll_layers};
use crate::common::test_utils::{run_system_once, set_clock};
use crate::common::tunables::Tunables;
use crate::plugins::weapons::{Arsenal, WeaponKind};

use super::{Aim, Locomotion, LocomotionState, Player, PlayerIntent, RollProgress};

fn roll_world(move_axis: Vec2) -> (World, Entity) {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(Aim::default());
    world.insert_resource(PlayerIntent {
        move_axis,
        roll_requested: true,
        ..default()
    });
    let player = world
        .spawn((
            Player,
            Locomotion::default(),
            Transform::default(),
            player_default_layers(),
        ))
        .id();
    (world, player)
}

#[test]
fn spawn_creates_player_with_default_loadout() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn);

    let mut q = world.query_filtered::<(&Locomotion, &Arsenal, &CollisionLayers), With<Player>>();
    let (loco, arsenal, layers) = q.single(&world).unwrap();
    assert!(!loco.is_rolling());
    assert_eq!(*layers, player_default_layers());
    assert_eq!(arsenal.equipped().map(|w| w.kind()), Some(WeaponKind::Basic));
}

#[test]
fn movement_intent_is_clamped_to_unit_length() {
    let mut loco = Locomotion::default();
    loco.set_movement_intent(Vec2::new(3.0, 4.0));
    assert!((loco.move_intent().length() - 1.0).abs() < 1e-6);

    loco.set_movement_intent(Vec2::new(0.3, 0.0));
    assert_eq!(loco.move_intent(), Vec2::new(0.3, 0.0));
}

#[test]
fn roll_uses_facing_when_intent_is_tiny() {
    let mut loco = Locomotion::default();
    loco.face_towards(Vec2::ZERO, Vec2::new(0.0, 10.0));
    loco.set_movement_intent(Vec2::new(0.1, 0.1));

    assert!(loco.try_start_roll(0.0));
    assert_eq!(
        loco.state(),
        LocomotionState::Rolling {
            direction: Vec2::Y,
            started_at: 0.0
        }
    );
}

#[test]
fn roll_while_rolling_changes_nothing() {
    let mut loco = Locomotion::default();
    loco.set_movement_intent(Vec2::X);
    assert!(loco.try_start_roll(1.0));

    loco.set_movement_intent(Vec2::Y);
    assert!(!loco.try_start_roll(1.5));
    assert_eq!(
        loco.state(),
        LocomotionState::Rolling {
            direction: Vec2::X,
            started_at: 1.0
        }
    );
}

#[test]
fn roll_ends_once_duration_has_elapsed() {
    let mut loco = Locomotion::default();
    loco.try_start_roll(2.0);

    assert_eq!(loco.update_roll(2.5, 1.0), RollProgress::Continuing);
    assert_eq!(loco.update_roll(3.0, 1.0), RollProgress::Ended);
    assert!(!loco.is_rolling());
    assert_eq!(loco.update_roll(3.1, 1.0), RollProgress::NotRolling);
}

#[test]
fn rolling_ignores_intent_and_knockback() {
    let mut loco = Locomotion::default();
    loco.set_movement_intent(Vec2::X);
    loco.try_start_roll(0.0);
    loco.set_movement_intent(Vec2::NEG_Y);
    loco.apply_knockback(Vec2::new(0.0, 500.0));

    assert_eq!(loco.velocity(100.0, 300.0), Vec2::new(300.0, 0.0));
}

#[test]
fn knockback_decays_monotonically_and_snaps_to_zero() {
    let mut loco = Locomotion::default();
    loco.apply_knockback(Vec2::new(-420.0, 0.0));

    let mut last = loco.knockback().length();
    let mut ticks = 0;
    while loco.knockback() != Vec2::ZERO {
        loco.decay_knockback(0.2, 1.0 / 64.0, 13.0);
        let now = loco.knockback().length();
        assert!(now < last);
        last = now;
        ticks += 1;
        assert!(ticks < 100_000, "knockback never reached zero");
    }
    assert_eq!(loco.knockback(), Vec2::ZERO);
}

#[test]
fn steep_recover_rate_removes_knockback_without_overshooting() {
    let mut loco = Locomotion::default();
    loco.apply_knockback(Vec2::new(-420.0, 0.0));

    // rate * dt = 4: clamped to removing everything in one tick.
    loco.decay_knockback(256.0, 1.0 / 64.0, 0.0);
    assert_eq!(loco.knockback(), Vec2::ZERO);

    loco.apply_knockback(Vec2::new(0.0, 100.0));
    for _ in 0..8 {
        loco.decay_knockback(256.0, 1.0 / 64.0, 0.0);
        assert!(loco.knockback().y >= 0.0);
        assert!(loco.knockback().length() <= 100.0);
    }
}

#[test]
fn knockback_accumulates() {
    let mut loco = Locomotion::default();
    loco.apply_knockback(Vec2::new(10.0, 0.0));
    loco.apply_knockback(Vec2::new(0.0, 5.0));
    assert_eq!(loco.knockback(), Vec2::new(10.0, 5.0));
}

#[test]
fn speed_modifier_scales_walking_only() {
    let mut loco = Locomotion::default();
    loco.set_movement_intent(Vec2::X);
    loco.set_speed_modifier(0.1);
    loco.apply_knockback(Vec2::new(0.0, 20.0));

    assert_eq!(loco.velocity(100.0, 300.0), Vec2::new(10.0, 20.0));

    loco.reset_speed_modifier();
    assert_eq!(loco.velocity(100.0, 300.0), Vec2::new(100.0, 20.0));
}

#[test]
fn resolve_roll_switches_layers_and_back() {
    let (mut world, player) = roll_world(Vec2::X);

    set_clock(&mut world, 1.0, 1.0 / 64.0);
    run_system_once(&mut world, super::resolve_roll);

    assert!(world.get::<Locomotion>(player).unwrap().is_rolling());
    assert_eq!(*world.get::<CollisionLayers>(player).unwrap(), player_roll_layers());
    assert!(!world.resource::<PlayerIntent>().roll_requested);

    // Half-way: still rolling.
    set_clock(&mut world, 1.5, 1.0 / 64.0);
    run_system_once(&mut world, super::resolve_roll);
    assert_eq!(*world.get::<CollisionLayers>(player).unwrap(), player_roll_layers());

    set_clock(&mut world, 2.0, 1.0 / 64.0);
    run_system_once(&mut world, super::resolve_roll);

    assert!(!world.get::<Locomotion>(player).unwrap().is_rolling());
    assert_eq!(*world.get::<CollisionLayers>(player).unwrap(), player_default_layers());
}

#[test]
fn resolve_roll_faces_the_aim_point() {
    let (mut world, player) = roll_world(Vec2::ZERO);
    world.resource_mut::<PlayerIntent>().roll_requested = false;
    world.resource_mut::<Aim>().world_point = Some(Vec2::new(0.0, -50.0));

    set_clock(&mut world, 0.5, 1.0 / 64.0);
    run_system_once(&mut world, super::resolve_roll);

    assert_eq!(world.get::<Locomotion>(player).unwrap().facing(), Vec2::NEG_Y);
}

#[test]
fn apply_movement_sets_velocity() {
    let mut world = World::new();
    world.insert_resource(Tunables {
        player_speed: 100.0,
        ..default()
    });

    let mut loco = Locomotion::default();
    loco.set_movement_intent(Vec2::X);
    world.spawn((Player, loco, LinearVelocity::ZERO, Transform::default()));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::new(100.0, 0.0));
}
