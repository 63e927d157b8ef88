//! Collectable upgrades placed in the arena.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::pickup_layers;
use crate::common::state::GameState;
use crate::plugins::player::Player;
use crate::plugins::weapons::WeaponKind;

use super::effect::{AnyUpgrade, PlayerEffect, ProjectileEffect, UpgradeDef, WeaponEffect};
use super::messages::CollectUpgrade;

const PICKUP_SIZE: f32 = 18.0;
/// Distance of the pickup ring from the arena centre.
const PICKUP_RING_RADIUS: f32 = 240.0;

#[derive(Component, Debug, Clone)]
pub struct UpgradePickup(pub AnyUpgrade);

/// The upgrades available in a run; one pickup is spawned for each.
#[derive(Resource, Debug, Clone)]
pub struct UpgradeCatalog {
    pub upgrades: Vec<AnyUpgrade>,
}

impl Default for UpgradeCatalog {
    fn default() -> Self {
        Self {
            upgrades: vec![
                AnyUpgrade::Weapon(UpgradeDef::new(
                    "Rapid Fire",
                    10.0,
                    WeaponEffect::FireRate {
                        multiplier: 0.5,
                        minimum_cooldown: 0.05,
                    },
                )),
                AnyUpgrade::Projectile(UpgradeDef::new(
                    "Bouncing Bullets",
                    10.0,
                    ProjectileEffect::Bouncing,
                )),
                AnyUpgrade::Player(UpgradeDef::new(
                    "Shotgun",
                    15.0,
                    PlayerEffect::ChangeWeapon {
                        weapon: WeaponKind::Shotgun,
                    },
                )),
                AnyUpgrade::Player(UpgradeDef::new(
                    "Charge Blaster",
                    15.0,
                    PlayerEffect::ChangeWeapon {
                        weapon: WeaponKind::Charge,
                    },
                )),
            ],
        }
    }
}

fn pickup_color(upgrade: &AnyUpgrade) -> Color {
    match upgrade {
        AnyUpgrade::Weapon(_) => Color::srgb(0.95, 0.4, 0.3),
        AnyUpgrade::Projectile(_) => Color::srgb(0.4, 0.9, 0.4),
        AnyUpgrade::Player(_) => Color::srgb(0.7, 0.5, 1.0),
    }
}

pub fn spawn_pickups(mut commands: Commands, catalog: Res<UpgradeCatalog>) {
    let count = catalog.upgrades.len().max(1) as f32;

    for (i, upgrade) in catalog.upgrades.iter().enumerate() {
        let angle = std::f32::consts::TAU * i as f32 / count;
        let pos = Vec2::from_angle(angle) * PICKUP_RING_RADIUS;

        commands.spawn((
            Name::new(format!("Pickup: {}", upgrade.name())),
            UpgradePickup(upgrade.clone()),
            Sprite {
                color: pickup_color(upgrade),
                custom_size: Some(Vec2::splat(PICKUP_SIZE)),
                ..default()
            },
            Transform::from_translation(pos.extend(1.0)),
            RigidBody::Static,
            Collider::rectangle(PICKUP_SIZE, PICKUP_SIZE),
            Sensor,
            pickup_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Player touching a pickup -> collect message for its category, pickup despawned.
pub fn collect_pickups(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    q_player: Query<(), With<Player>>,
    q_pickups: Query<&UpgradePickup>,
    mut weapon: MessageWriter<CollectUpgrade<WeaponEffect>>,
    mut projectile: MessageWriter<CollectUpgrade<ProjectileEffect>>,
    mut player: MessageWriter<CollectUpgrade<PlayerEffect>>,
    // A pickup overlapping several player colliders is still collected once.
    mut taken: Local<HashSet<Entity>>,
) {
    taken.clear();

    for ev in started.read() {
        let (pickup_e, other) = if q_pickups.contains(ev.collider1) {
            (ev.collider1, ev.body2.unwrap_or(ev.collider2))
        } else if q_pickups.contains(ev.collider2) {
            (ev.collider2, ev.body1.unwrap_or(ev.collider1))
        } else {
            continue;
        };

        if !q_player.contains(other) || !taken.insert(pickup_e) {
            continue;
        }
        let Ok(UpgradePickup(upgrade)) = q_pickups.get(pickup_e) else {
            continue;
        };

        debug!("Picked up '{}'", upgrade.name());
        match upgrade {
            AnyUpgrade::Weapon(def) => {
                weapon.write(CollectUpgrade(def.clone()));
            }
            AnyUpgrade::Projectile(def) => {
                projectile.write(CollectUpgrade(def.clone()));
            }
            AnyUpgrade::Player(def) => {
                player.write(CollectUpgrade(def.clone()));
            }
        }
        commands.entity(pickup_e).despawn();
    }
}
