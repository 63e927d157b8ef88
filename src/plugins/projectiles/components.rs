use bevy::prelude::*;

/// What a projectile does when it touches a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallPolicy {
    #[default]
    Destroy,
    /// Reflect about the wall normal and keep flying.
    Bounce,
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    direction: Vec2,
    speed: f32,
    damage: i32,
    wall_policy: WallPolicy,
    default_policy: WallPolicy,
}

impl Projectile {
    /// `direction` is normalized; a zero direction flies along +X.
    pub fn new(direction: Vec2, speed: f32, damage: i32) -> Self {
        Self {
            direction: direction.try_normalize().unwrap_or(Vec2::X),
            speed,
            damage,
            wall_policy: WallPolicy::Destroy,
            default_policy: WallPolicy::Destroy,
        }
    }

    /// Change the policy this projectile reverts to.
    pub fn with_default_policy(mut self, policy: WallPolicy) -> Self {
        self.default_policy = policy;
        self.wall_policy = policy;
        self
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn damage(&self) -> i32 {
        self.damage
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    #[inline]
    pub fn wall_policy(&self) -> WallPolicy {
        self.wall_policy
    }

    pub fn set_wall_policy(&mut self, policy: WallPolicy) {
        self.wall_policy = policy;
    }

    pub fn reset_wall_policy(&mut self) {
        self.wall_policy = self.default_policy;
    }

    /// Mirror the direction about `normal`. Speed is unchanged.
    ///
    /// A projectile already moving away from the surface keeps its direction, so a
    /// contact reported twice cannot send it back into the wall.
    pub fn reflect(&mut self, normal: Vec2) {
        let Some(n) = normal.try_normalize() else {
            return;
        };
        if self.direction.dot(n) >= 0.0 {
            return;
        }
        self.direction = self.direction.reflect(n);
    }
}

#[derive(Component, Deref, DerefMut)]
pub struct Lifetime(pub Timer);
