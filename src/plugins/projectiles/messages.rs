//! Projectile spawn requests and notifications.
//!
//! Weapons only write intent (`SpawnProjectile`); the projectile systems are the
//! single place that creates projectile entities.

use bevy::prelude::*;

use crate::plugins::weapons::Shot;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectile {
    pub origin: Vec2,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub damage: i32,
}

impl From<Shot> for SpawnProjectile {
    fn from(shot: Shot) -> Self {
        Self {
            origin: shot.origin,
            direction: shot.direction,
            speed: shot.speed,
            damage: shot.damage,
        }
    }
}

/// A projectile entity now exists and can be modified.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileSpawned {
    pub entity: Entity,
}

/// A projectile started touching a wall.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct WallContact {
    pub projectile: Entity,
    pub wall: Entity,
    /// Unit surface normal pointing out of the wall.
    pub normal: Vec2,
}
