//! Per-category bookkeeping of active upgrades.

use std::sync::Arc;

use bevy::prelude::*;

use super::effect::UpgradeDef;

/// One activation of an upgrade.
#[derive(Debug, Clone)]
pub struct ActiveUpgrade<E> {
    def: Arc<UpgradeDef<E>>,
    started_at: f32,
}

impl<E> ActiveUpgrade<E> {
    #[inline]
    pub fn def(&self) -> &UpgradeDef<E> {
        &self.def
    }

    #[inline]
    pub fn started_at(&self) -> f32 {
        self.started_at
    }

    /// Active on `[started_at, started_at + duration]`, expired strictly after.
    #[inline]
    pub fn is_expired(&self, now: f32) -> bool {
        now - self.started_at > self.def.duration_secs
    }
}

/// Active upgrades of one category.
///
/// Collecting the same upgrade twice yields two records with their own timers.
#[derive(Resource, Debug)]
pub struct UpgradeManager<E: Send + Sync + 'static> {
    active: Vec<ActiveUpgrade<E>>,
}

impl<E: Send + Sync + 'static> Default for UpgradeManager<E> {
    fn default() -> Self {
        Self { active: Vec::new() }
    }
}

impl<E: Send + Sync + 'static> UpgradeManager<E> {
    /// Start tracking `def`. Activating the effect is the caller's job.
    pub fn collect(&mut self, def: Arc<UpgradeDef<E>>, now: f32) -> &ActiveUpgrade<E> {
        self.active.push(ActiveUpgrade {
            def,
            started_at: now,
        });
        &self.active[self.active.len() - 1]
    }

    /// Drop every expired record, calling `deactivate` once for each one first.
    /// Returns how many were removed.
    pub fn sweep_expired(&mut self, now: f32, mut deactivate: impl FnMut(&UpgradeDef<E>)) -> usize {
        let before = self.active.len();
        self.active.retain(|record| {
            if record.is_expired(now) {
                deactivate(&record.def);
                false
            } else {
                true
            }
        });
        before - self.active.len()
    }

    pub fn active(&self) -> &[ActiveUpgrade<E>] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
