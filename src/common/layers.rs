//! Collision layers and the player's collision profiles.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    /// Anything a rolling player passes through (enemy fire, hazards).
    ///
    /// Nothing in the arena itself joins this layer; enemies and traps added on
    /// top of the core do, and the roll profile lets the player pass through them.
    Hazard,
    PlayerBullet,
    Pickup,
}

/// Layers of a player on foot.
#[inline]
pub fn player_default_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World, Layer::Hazard, Layer::Pickup])
}

/// Layers of a rolling player: same membership, hazards filtered out.
#[inline]
pub fn player_roll_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World, Layer::Pickup])
}

#[inline]
pub fn projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [Layer::World])
}

#[inline]
pub fn pickup_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Pickup, [Layer::Player])
}

#[inline]
pub fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}
