use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::projectile_layers;
use crate::common::{state::GameState, tunables::Tunables};

use super::components::{Lifetime, Projectile};
use super::messages::{ProjectileSpawned, SpawnProjectile};

const PROJECTILE_RADIUS: f32 = 4.0;

/// Consume spawn requests and announce each new projectile.
pub fn spawn_projectiles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut requests: MessageReader<SpawnProjectile>,
    mut spawned: MessageWriter<ProjectileSpawned>,
) {
    for req in requests.read() {
        let projectile = Projectile::new(req.direction, req.speed, req.damage);
        let velocity = projectile.velocity();

        let entity = commands
            .spawn((
                Name::new("Projectile"),
                projectile,
                Lifetime(Timer::from_seconds(tunables.projectile_lifetime, TimerMode::Once)),
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(Vec2::splat(PROJECTILE_RADIUS * 2.0)),
                    ..default()
                },
                Transform::from_translation(req.origin.extend(2.0)),
                RigidBody::Dynamic,
                Collider::circle(PROJECTILE_RADIUS),
                projectile_layers(),
                // The solver bounces it off walls for one step; the wall policy decides what happens next.
                Restitution::new(1.0).with_combine_rule(CoefficientCombine::Max),
                Friction::ZERO,
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity(velocity),
                CollisionEventsEnabled,
                DespawnOnExit(GameState::InGame),
            ))
            .id();

        spawned.write(ProjectileSpawned { entity });
    }
}

/// Projectiles fly at constant speed along their direction.
pub fn drive_projectiles(mut q: Query<(&Projectile, &mut LinearVelocity)>) {
    for (projectile, mut vel) in &mut q {
        vel.0 = projectile.velocity();
    }
}

pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Lifetime)>,
) {
    for (e, mut lt) in &mut q {
        lt.tick(time.delta());
        if lt.is_finished() {
            commands.entity(e).despawn();
        }
    }
}
