//! Player locomotion state machine.
//!
//! Plain data + methods, no ECS access: systems feed it the clock and the
//! tunables and copy the result into physics.
//!
//! ```text
//!            try_start_roll (Normal only)
//!   Normal ───────────────────────────────▶ Rolling { direction, started_at }
//!     ▲                                            │
//!     └──────── update_roll: elapsed ≥ duration ◀──┘
//! ```

use bevy::prelude::*;

/// Intents shorter than this (squared) roll towards the facing direction instead.
const MIN_ROLL_INTENT_SQ: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionState {
    Normal,
    /// Direction and start time are fixed for the whole roll.
    Rolling { direction: Vec2, started_at: f32 },
}

/// Result of advancing a roll by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollProgress {
    NotRolling,
    Continuing,
    Ended,
}

#[derive(Component, Debug, Clone)]
pub struct Locomotion {
    move_intent: Vec2,
    knockback: Vec2,
    speed_modifier: f32,
    facing: Vec2,
    state: LocomotionState,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            move_intent: Vec2::ZERO,
            knockback: Vec2::ZERO,
            speed_modifier: 1.0,
            facing: Vec2::X,
            state: LocomotionState::Normal,
        }
    }
}

impl Locomotion {
    #[inline]
    pub fn move_intent(&self) -> Vec2 {
        self.move_intent
    }

    #[inline]
    pub fn knockback(&self) -> Vec2 {
        self.knockback
    }

    #[inline]
    pub fn speed_modifier(&self) -> f32 {
        self.speed_modifier
    }

    #[inline]
    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    #[inline]
    pub fn state(&self) -> LocomotionState {
        self.state
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        matches!(self.state, LocomotionState::Rolling { .. })
    }

    /// Record the movement intent, clamped to unit length.
    ///
    /// Still recorded while rolling; it only takes effect once the roll ends.
    pub fn set_movement_intent(&mut self, intent: Vec2) {
        self.move_intent = if intent.length_squared() > 1.0 {
            intent.normalize()
        } else {
            intent
        };
    }

    /// Turn towards `target`. A target on top of `position` keeps the old facing.
    pub fn face_towards(&mut self, position: Vec2, target: Vec2) {
        if let Some(dir) = (target - position).try_normalize() {
            self.facing = dir;
        }
    }

    /// Start a dodge-roll. Returns `false` (and changes nothing) while already rolling.
    pub fn try_start_roll(&mut self, now: f32) -> bool {
        if self.is_rolling() {
            return false;
        }

        let direction = if self.move_intent.length_squared() < MIN_ROLL_INTENT_SQ {
            self.facing
        } else {
            self.move_intent.normalize()
        };

        self.state = LocomotionState::Rolling {
            direction,
            started_at: now,
        };
        true
    }

    /// End the roll once `roll_duration` seconds have elapsed.
    pub fn update_roll(&mut self, now: f32, roll_duration: f32) -> RollProgress {
        let LocomotionState::Rolling { started_at, .. } = self.state else {
            return RollProgress::NotRolling;
        };

        if now - started_at >= roll_duration {
            self.state = LocomotionState::Normal;
            RollProgress::Ended
        } else {
            RollProgress::Continuing
        }
    }

    /// Knockback is additive; several sources in one tick accumulate.
    pub fn apply_knockback(&mut self, impulse: Vec2) {
        self.knockback += impulse;
    }

    /// Remove `rate` of the knockback per second and snap to zero below `epsilon`.
    ///
    /// At most the whole knockback is removed in one tick, whatever `rate * dt` is.
    pub fn decay_knockback(&mut self, rate: f32, dt: f32, epsilon: f32) {
        self.knockback -= self.knockback * (rate * dt).clamp(0.0, 1.0);

        if self.knockback.length_squared() < epsilon * epsilon {
            self.knockback = Vec2::ZERO;
        }
    }

    /// Sets (does not stack) the movement speed multiplier.
    pub fn set_speed_modifier(&mut self, modifier: f32) {
        self.speed_modifier = modifier;
    }

    pub fn reset_speed_modifier(&mut self) {
        self.speed_modifier = 1.0;
    }

    /// Velocity for this tick.
    pub fn velocity(&self, move_speed: f32, roll_speed: f32) -> Vec2 {
        match self.state {
            LocomotionState::Rolling { direction, .. } => direction * roll_speed,
            LocomotionState::Normal => {
                self.move_intent * move_speed * self.speed_modifier + self.knockback
            }
        }
    }
}
