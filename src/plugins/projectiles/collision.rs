//! Wall contacts.
//!
//! `detect_wall_contacts` turns Avian's `CollisionStart` into `WallContact`
//! messages (with a surface normal); `resolve_wall_contacts` applies each
//! projectile's wall policy. Other systems may read `WallContact` too.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::layers::{is_in_layer, Layer};

use super::components::{Projectile, WallPolicy};
use super::messages::WallContact;

pub fn detect_wall_contacts(
    mut started: MessageReader<CollisionStart>,
    q_projectiles: Query<(&Projectile, &Transform)>,
    q_walls: Query<(&CollisionLayers, &Collider, &Transform), Without<Projectile>>,
    mut contacts: MessageWriter<WallContact>,
) {
    for ev in started.read() {
        let (projectile, wall) = if q_projectiles.contains(ev.collider1) {
            (ev.collider1, ev.collider2)
        } else if q_projectiles.contains(ev.collider2) {
            (ev.collider2, ev.collider1)
        } else {
            continue;
        };

        let Ok((wall_layers, wall_collider, wall_tf)) = q_walls.get(wall) else {
            continue;
        };
        if !is_in_layer(wall_layers, Layer::World) {
            continue;
        }
        let Ok((p, p_tf)) = q_projectiles.get(projectile) else {
            continue;
        };

        let normal = surface_normal(wall_collider, wall_tf, p_tf.translation.truncate())
            .unwrap_or(-p.direction());

        contacts.write(WallContact {
            projectile,
            wall,
            normal,
        });
    }
}

/// Unit vector from the closest point on the wall towards `point`.
///
/// `None` when `point` is on or inside the wall surface.
fn surface_normal(collider: &Collider, wall_tf: &Transform, point: Vec2) -> Option<Vec2> {
    let (angle, _, _) = wall_tf.rotation.to_euler(EulerRot::ZYX);
    let (closest, inside) = collider.project_point(
        Position::new(wall_tf.translation.truncate()),
        Rotation::radians(angle),
        point,
        true,
    );
    if inside {
        return None;
    }
    (point - closest).try_normalize()
}

pub fn resolve_wall_contacts(
    mut commands: Commands,
    mut contacts: MessageReader<WallContact>,
    mut q_projectiles: Query<&mut Projectile>,
    // Several walls can be touched in one step; despawn once.
    mut despawned: Local<HashSet<Entity>>,
) {
    despawned.clear();

    for contact in contacts.read() {
        let Ok(mut projectile) = q_projectiles.get_mut(contact.projectile) else {
            debug!("Dropping wall contact of missing projectile {:?}", contact.projectile);
            continue;
        };

        match projectile.wall_policy() {
            WallPolicy::Destroy => {
                if despawned.insert(contact.projectile) {
                    commands.entity(contact.projectile).despawn();
                }
            }
            WallPolicy::Bounce => projectile.reflect(contact.normal),
        }
    }
}
