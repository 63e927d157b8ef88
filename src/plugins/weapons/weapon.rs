//! The weapon trigger contract and its three firing patterns.
//!
//! A weapon never touches the ECS. `fire` is called once per fixed tick while the
//! trigger is held (the caller gates on rolling / pause), `stop_firing` once on
//! release. Both report what happened; the caller turns the report into messages.
//!
//! Variant hooks that act on the holder (recoil knockback, charge slowdown) write
//! straight into the holder's `Locomotion`.

use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::{FirePattern, WeaponConfig};
use crate::plugins::player::Locomotion;

use super::WeaponKind;

/// Charge blaster phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargePhase {
    Idle,
    Charging { started_at: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeaponVariant {
    /// One projectile per cooldown towards the aim point.
    Simple,
    /// Several randomly spread projectiles per muzzle, recoil on the holder.
    Spread {
        bullets_per_barrel: u32,
        spread_degrees: f32,
        knockback: f32,
    },
    /// Hold for `cooldown` seconds to release one heavy projectile.
    Charge {
        knockback: f32,
        speed_modifier_on_charge: f32,
        phase: ChargePhase,
    },
}

/// Holder position and facing in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    /// Unit vector.
    pub facing: Vec2,
}

/// One projectile to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub origin: Vec2,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub damage: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireOutcome {
    /// A discharge happened this tick.
    pub discharged: bool,
    pub shots: Vec<Shot>,
    pub charge_started: bool,
}

/// What `stop_firing` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The trigger was not held; nothing changed.
    Ignored,
    Released,
    /// A charge weapon was released: charge cancelled, holder speed restored.
    ChargeStopped,
}

#[derive(Debug, Clone)]
pub struct Weapon {
    kind: WeaponKind,
    cooldown_base: f32,
    cooldown_current: f32,
    last_shot_at: Option<f32>,
    is_firing: bool,
    active: bool,
    inert: bool,
    muzzles: Vec<Vec2>,
    projectile_speed: f32,
    projectile_damage: i32,
    variant: WeaponVariant,
}

impl Weapon {
    /// Build a weapon from configuration.
    ///
    /// An invalid configuration still yields a weapon so the loadout keeps its
    /// shape, but the weapon is inert: it never fires.
    pub fn from_config(config: &WeaponConfig) -> Self {
        let inert = match config.validate() {
            Ok(()) => false,
            Err(e) => {
                warn!("Weapon {:?} is inert: {e}", config.kind);
                true
            }
        };

        let variant = match config.pattern {
            FirePattern::Single => WeaponVariant::Simple,
            FirePattern::Spread {
                bullets_per_barrel,
                spread_degrees,
                knockback,
            } => WeaponVariant::Spread {
                bullets_per_barrel,
                spread_degrees: spread_degrees.abs(),
                knockback,
            },
            FirePattern::Charge {
                knockback,
                speed_modifier_on_charge,
            } => WeaponVariant::Charge {
                knockback,
                speed_modifier_on_charge,
                phase: ChargePhase::Idle,
            },
        };

        Self {
            kind: config.kind,
            cooldown_base: config.cooldown,
            cooldown_current: config.cooldown,
            last_shot_at: None,
            is_firing: false,
            active: false,
            inert,
            muzzles: config.muzzles.iter().map(|&m| Vec2::from(m)).collect(),
            projectile_speed: config.projectile_speed,
            projectile_damage: config.projectile_damage,
            variant,
        }
    }

    #[inline]
    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    #[inline]
    pub fn is_firing(&self) -> bool {
        self.is_firing
    }

    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown_current
    }

    #[inline]
    pub fn cooldown_base(&self) -> f32 {
        self.cooldown_base
    }

    pub fn charge_phase(&self) -> Option<ChargePhase> {
        match self.variant {
            WeaponVariant::Charge { phase, .. } => Some(phase),
            _ => None,
        }
    }

    pub fn set_cooldown(&mut self, seconds: f32) {
        self.cooldown_current = seconds;
    }

    pub fn reset_cooldown(&mut self) {
        self.cooldown_current = self.cooldown_base;
    }

    /// Only the arsenal toggles activity; it stops the weapon first.
    pub(super) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn cooled_down(&self, now: f32) -> bool {
        self.last_shot_at
            .is_none_or(|last| now - last >= self.cooldown_current)
    }

    /// Validated weapons always have one; inert ones never get this far.
    fn primary_muzzle(&self) -> Vec2 {
        self.muzzles.first().copied().unwrap_or(Vec2::ZERO)
    }

    fn muzzle_world(&self, muzzle: Vec2, pose: Pose) -> Vec2 {
        pose.position + pose.facing.rotate(muzzle)
    }

    fn shot(&self, origin: Vec2, direction: Vec2) -> Shot {
        Shot {
            origin,
            direction,
            speed: self.projectile_speed,
            damage: self.projectile_damage,
        }
    }

    /// Pull the trigger for one tick.
    ///
    /// Inactive or inert weapons report no discharge and keep their state.
    pub fn fire(
        &mut self,
        holder: &mut Locomotion,
        pose: Pose,
        aim: Vec2,
        now: f32,
        rng: &mut impl Rng,
    ) -> FireOutcome {
        let mut outcome = FireOutcome::default();
        if !self.active || self.inert {
            return outcome;
        }
        self.is_firing = true;

        match self.variant.clone() {
            WeaponVariant::Simple => {
                if !self.cooled_down(now) {
                    return outcome;
                }
                self.last_shot_at = Some(now);

                let origin = self.muzzle_world(self.primary_muzzle(), pose);
                let direction = aim_direction(origin, aim, pose.facing);
                outcome.shots.push(self.shot(origin, direction));
            }
            WeaponVariant::Spread {
                bullets_per_barrel,
                spread_degrees,
                knockback,
            } => {
                if !self.cooled_down(now) {
                    return outcome;
                }
                self.last_shot_at = Some(now);

                for &muzzle in &self.muzzles {
                    let origin = self.muzzle_world(muzzle, pose);
                    let base = aim_direction(origin, aim, pose.facing);

                    for _ in 0..bullets_per_barrel {
                        let angle = rng.gen_range(-spread_degrees..=spread_degrees).to_radians();
                        let direction = Vec2::from_angle(angle).rotate(base);
                        outcome.shots.push(self.shot(origin, direction));
                    }
                }

                holder.apply_knockback(-pose.facing * knockback);
            }
            WeaponVariant::Charge {
                knockback,
                speed_modifier_on_charge,
                phase,
            } => match phase {
                ChargePhase::Idle => {
                    self.set_charge_phase(ChargePhase::Charging { started_at: now });
                    holder.set_speed_modifier(speed_modifier_on_charge);
                    outcome.charge_started = true;
                    return outcome;
                }
                ChargePhase::Charging { started_at } => {
                    if now - started_at < self.cooldown_current {
                        return outcome;
                    }
                    self.set_charge_phase(ChargePhase::Idle);
                    self.last_shot_at = Some(now);

                    // The blast leaves along the facing, not towards the cursor.
                    let origin = self.muzzle_world(self.primary_muzzle(), pose);
                    outcome.shots.push(self.shot(origin, pose.facing));

                    // Speed stays reduced until the trigger is released.
                    holder.apply_knockback(-pose.facing * knockback);
                }
            },
        }

        outcome.discharged = true;
        outcome
    }

    /// Release the trigger.
    pub fn stop_firing(&mut self, holder: &mut Locomotion) -> Release {
        if !self.is_firing {
            return Release::Ignored;
        }
        self.is_firing = false;

        match self.variant {
            WeaponVariant::Charge { .. } => {
                self.set_charge_phase(ChargePhase::Idle);
                holder.reset_speed_modifier();
                Release::ChargeStopped
            }
            _ => Release::Released,
        }
    }

    fn set_charge_phase(&mut self, next: ChargePhase) {
        if let WeaponVariant::Charge { phase, .. } = &mut self.variant {
            *phase = next;
        }
    }
}

/// Unit direction from `origin` to `aim`; `fallback` when they coincide.
fn aim_direction(origin: Vec2, aim: Vec2, fallback: Vec2) -> Vec2 {
    (aim - origin).try_normalize().unwrap_or(fallback)
}
