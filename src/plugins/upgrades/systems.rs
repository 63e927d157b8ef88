//! Collect / reapply / expire systems, one set per category.
//!
//! Targets are queried at the moment an effect runs, so weapons or projectiles
//! that appeared since the last activation are always included.

use bevy::prelude::*;

use crate::plugins::player::{Locomotion, Player};
use crate::plugins::projectiles::{Projectile, ProjectileSpawned};
use crate::plugins::weapons::{Arsenal, ChargeStopped, Release};

use super::effect::{PlayerEffect, ProjectileEffect, WeaponEffect};
use super::manager::UpgradeManager;
use super::messages::CollectUpgrade;

pub fn collect_weapon_upgrades(
    time: Res<Time>,
    mut collected: MessageReader<CollectUpgrade<WeaponEffect>>,
    mut manager: ResMut<UpgradeManager<WeaponEffect>>,
    mut q_arsenals: Query<&mut Arsenal>,
) {
    let now = time.elapsed_secs();
    for CollectUpgrade(def) in collected.read() {
        manager.collect(def.clone(), now);
        for mut arsenal in &mut q_arsenals {
            def.effect.activate(arsenal.weapons_mut());
        }
        info!("Upgrade '{}' active for {}s", def.name, def.duration_secs);
    }
}

pub fn expire_weapon_upgrades(
    time: Res<Time>,
    mut manager: ResMut<UpgradeManager<WeaponEffect>>,
    mut q_arsenals: Query<&mut Arsenal>,
) {
    manager.sweep_expired(time.elapsed_secs(), |def| {
        for mut arsenal in &mut q_arsenals {
            def.effect.deactivate(arsenal.weapons_mut());
        }
        info!("Upgrade '{}' expired", def.name);
    });
}

pub fn collect_projectile_upgrades(
    time: Res<Time>,
    mut collected: MessageReader<CollectUpgrade<ProjectileEffect>>,
    mut manager: ResMut<UpgradeManager<ProjectileEffect>>,
    mut q_projectiles: Query<&mut Projectile>,
) {
    let now = time.elapsed_secs();
    for CollectUpgrade(def) in collected.read() {
        manager.collect(def.clone(), now);
        def.effect.activate(q_projectiles.iter_mut());
        info!("Upgrade '{}' active for {}s", def.name, def.duration_secs);
    }
}

/// New projectiles get every active projectile effect.
pub fn reapply_projectile_upgrades(
    mut spawned: MessageReader<ProjectileSpawned>,
    manager: Res<UpgradeManager<ProjectileEffect>>,
    mut q_projectiles: Query<&mut Projectile>,
) {
    if spawned.read().count() == 0 || manager.is_empty() {
        return;
    }
    for record in manager.active() {
        record.def().effect.reapply(q_projectiles.iter_mut());
    }
}

pub fn expire_projectile_upgrades(
    time: Res<Time>,
    mut manager: ResMut<UpgradeManager<ProjectileEffect>>,
    mut q_projectiles: Query<&mut Projectile>,
) {
    manager.sweep_expired(time.elapsed_secs(), |def| {
        def.effect.deactivate(q_projectiles.iter_mut());
        info!("Upgrade '{}' expired", def.name);
    });
}

pub fn collect_player_upgrades(
    time: Res<Time>,
    mut collected: MessageReader<CollectUpgrade<PlayerEffect>>,
    mut manager: ResMut<UpgradeManager<PlayerEffect>>,
    mut q_player: Query<(&mut Arsenal, &mut Locomotion), With<Player>>,
    mut stopped: MessageWriter<ChargeStopped>,
) {
    let now = time.elapsed_secs();
    for CollectUpgrade(def) in collected.read() {
        manager.collect(def.clone(), now);
        for (mut arsenal, mut loco) in &mut q_player {
            let previous = arsenal.equipped().map(|w| w.kind());
            let release = def.effect.activate(&mut arsenal, &mut loco);
            if let (Some(Release::ChargeStopped), Some(weapon)) = (release, previous) {
                stopped.write(ChargeStopped { weapon });
            }
        }
        info!("Upgrade '{}' active for {}s", def.name, def.duration_secs);
    }
}

pub fn expire_player_upgrades(
    time: Res<Time>,
    mut manager: ResMut<UpgradeManager<PlayerEffect>>,
    mut q_player: Query<(&mut Arsenal, &mut Locomotion), With<Player>>,
    mut stopped: MessageWriter<ChargeStopped>,
) {
    manager.sweep_expired(time.elapsed_secs(), |def| {
        for (mut arsenal, mut loco) in &mut q_player {
            let previous = arsenal.equipped().map(|w| w.kind());
            let release = def.effect.deactivate(&mut arsenal, &mut loco);
            if let (Some(Release::ChargeStopped), Some(weapon)) = (release, previous) {
                stopped.write(ChargeStopped { weapon });
            }
        }
        info!("Upgrade '{}' expired", def.name);
    });
}
