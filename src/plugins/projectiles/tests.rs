//! Projectile tests.
//!
//! Collisions are injected as `CollisionStart` messages instead of running the
//! physics pipeline, so each system is exercised deterministically.

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::layers::{projectile_layers, Layer};
use crate::common::test_utils::{run_system_once, set_clock};
use crate::common::tunables::Tunables;

use super::components::{Lifetime, Projectile, WallPolicy};
use super::messages::{ProjectileSpawned, SpawnProjectile, WallContact};
use super::{collision, systems};

fn collision_world() -> World {
    let mut world = World::new();
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<WallContact>>();
    world
}

/// A 20 px thick horizontal wall whose top face is at y = 0.
fn spawn_floor_wall(world: &mut World) -> Entity {
    world
        .spawn((
            Transform::from_xyz(0.0, -10.0, 0.0),
            Collider::rectangle(400.0, 20.0),
            CollisionLayers::new(Layer::World, [Layer::PlayerBullet]),
        ))
        .id()
}

fn spawn_projectile(world: &mut World, at: Vec2, projectile: Projectile) -> Entity {
    world
        .spawn((projectile, Transform::from_translation(at.extend(0.0))))
        .id()
}

fn write_collision(world: &mut World, a: Entity, b: Entity) {
    world.write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: None,
        body2: None,
    });
}

fn wall_contacts(world: &mut World) -> Vec<WallContact> {
    world
        .resource_mut::<Messages<WallContact>>()
        .drain()
        .collect()
}

#[test]
fn reflect_mirrors_about_the_normal() {
    let mut p = Projectile::new(Vec2::new(1.0, -1.0), 100.0, 1);
    p.reflect(Vec2::Y);

    let expected = Vec2::new(1.0, 1.0).normalize();
    assert!((p.direction() - expected).length() < 1e-6);
    assert_eq!(p.speed(), 100.0);
}

#[test]
fn reflect_ignores_surfaces_it_is_leaving() {
    let mut p = Projectile::new(Vec2::new(1.0, 1.0), 100.0, 1);
    let before = p.direction();
    p.reflect(Vec2::Y);
    assert_eq!(p.direction(), before);
}

#[test]
fn wall_policy_resets_to_its_default() {
    let mut p = Projectile::new(Vec2::X, 1.0, 1);
    assert_eq!(p.wall_policy(), WallPolicy::Destroy);

    p.set_wall_policy(WallPolicy::Bounce);
    p.reset_wall_policy();
    assert_eq!(p.wall_policy(), WallPolicy::Destroy);

    let mut bouncy = Projectile::new(Vec2::X, 1.0, 1).with_default_policy(WallPolicy::Bounce);
    bouncy.set_wall_policy(WallPolicy::Destroy);
    bouncy.reset_wall_policy();
    assert_eq!(bouncy.wall_policy(), WallPolicy::Bounce);
}

#[test]
fn spawn_projectiles_consumes_requests_and_announces_entities() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<Messages<SpawnProjectile>>();
    world.init_resource::<Messages<ProjectileSpawned>>();

    world.write_message(SpawnProjectile {
        origin: Vec2::new(10.0, 5.0),
        direction: Vec2::Y,
        speed: 900.0,
        damage: 3,
    });

    run_system_once(&mut world, systems::spawn_projectiles);

    let spawned: Vec<_> = world
        .resource_mut::<Messages<ProjectileSpawned>>()
        .drain()
        .collect();
    assert_eq!(spawned.len(), 1);

    let e = spawned[0].entity;
    let p = world.get::<Projectile>(e).unwrap();
    assert_eq!(p.damage(), 3);
    assert_eq!(p.wall_policy(), WallPolicy::Destroy);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(0.0, 900.0));
    assert_eq!(*world.get::<CollisionLayers>(e).unwrap(), projectile_layers());
    assert_eq!(
        world.get::<Transform>(e).unwrap().translation.truncate(),
        Vec2::new(10.0, 5.0)
    );
}

#[test]
fn drive_projectiles_follows_direction_changes() {
    let mut world = World::new();
    let mut p = Projectile::new(Vec2::NEG_Y, 50.0, 1);
    p.reflect(Vec2::Y);
    let e = world.spawn((p, LinearVelocity(Vec2::ZERO))).id();

    run_system_once(&mut world, systems::drive_projectiles);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(0.0, 50.0));
}

#[test]
fn expire_projectiles_despawns_after_lifetime() {
    let mut world = World::new();
    let e = world
        .spawn((
            Projectile::new(Vec2::X, 1.0, 1),
            Lifetime(Timer::from_seconds(0.5, TimerMode::Once)),
        ))
        .id();

    set_clock(&mut world, 0.25, 0.25);
    run_system_once(&mut world, systems::expire_projectiles);
    assert!(world.get_entity(e).is_ok());

    set_clock(&mut world, 0.5, 0.25);
    run_system_once(&mut world, systems::expire_projectiles);
    assert!(world.get_entity(e).is_err());
}

#[test]
fn wall_contact_reports_the_outward_normal() {
    let mut world = collision_world();
    let wall = spawn_floor_wall(&mut world);
    let p = spawn_projectile(&mut world, Vec2::new(30.0, 3.0), Projectile::new(Vec2::NEG_Y, 100.0, 1));

    // Either collider order.
    write_collision(&mut world, wall, p);
    run_system_once(&mut world, collision::detect_wall_contacts);

    let contacts = wall_contacts(&mut world);
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].projectile, p);
    assert_eq!(contacts[0].wall, wall);
    assert!((contacts[0].normal - Vec2::Y).length() < 1e-4);
}

#[test]
fn non_wall_contacts_are_ignored() {
    let mut world = collision_world();
    let other = world
        .spawn((
            Transform::default(),
            Collider::circle(5.0),
            CollisionLayers::new(Layer::Hazard, [Layer::Player]),
        ))
        .id();
    let p = spawn_projectile(&mut world, Vec2::ZERO, Projectile::new(Vec2::X, 1.0, 1));
    let not_a_projectile = world.spawn(Transform::default()).id();

    write_collision(&mut world, p, other);
    write_collision(&mut world, not_a_projectile, other);
    run_system_once(&mut world, collision::detect_wall_contacts);

    assert!(wall_contacts(&mut world).is_empty());
}

#[test]
fn destroy_policy_despawns_once() {
    let mut world = collision_world();
    let wall = spawn_floor_wall(&mut world);
    let p = spawn_projectile(&mut world, Vec2::new(0.0, 3.0), Projectile::new(Vec2::NEG_Y, 100.0, 1));

    for _ in 0..2 {
        world.write_message(WallContact {
            projectile: p,
            wall,
            normal: Vec2::Y,
        });
    }
    run_system_once(&mut world, collision::resolve_wall_contacts);

    assert!(world.get_entity(p).is_err());
}

#[test]
fn bounce_policy_reflects_and_survives() {
    let mut world = collision_world();
    let wall = spawn_floor_wall(&mut world);
    let mut projectile = Projectile::new(Vec2::new(1.0, -1.0), 100.0, 1);
    projectile.set_wall_policy(WallPolicy::Bounce);
    let p = spawn_projectile(&mut world, Vec2::new(0.0, 3.0), projectile);

    write_collision(&mut world, p, wall);
    run_system_once(&mut world, collision::detect_wall_contacts);
    run_system_once(&mut world, collision::resolve_wall_contacts);

    let p = world.get::<Projectile>(p).unwrap();
    assert!(p.direction().y > 0.0);
    assert!(p.direction().x > 0.0);
}
