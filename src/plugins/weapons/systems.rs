use bevy::prelude::*;

use crate::plugins::player::{Aim, Locomotion, Player, PlayerIntent};
use crate::plugins::projectiles::messages::SpawnProjectile;

use super::messages::{ChargeStarted, ChargeStopped, EquipWeapon, ShotFired};
use super::weapon::{Pose, Release};
use super::{Arsenal, WeaponKind, WeaponRng};

/// Aim this far ahead of the player when the cursor is unavailable.
const FALLBACK_AIM_DISTANCE: f32 = 100.0;

pub fn equip_hotkeys(keys: Option<Res<ButtonInput<KeyCode>>>, mut equip: MessageWriter<EquipWeapon>) {
    let Some(keys) = keys else { return; };

    let slots = [
        (KeyCode::Digit1, WeaponKind::Basic),
        (KeyCode::Digit2, WeaponKind::Shotgun),
        (KeyCode::Digit3, WeaponKind::Charge),
    ];
    for (key, kind) in slots {
        if keys.just_pressed(key) {
            equip.write(EquipWeapon(kind));
        }
    }
}

pub fn apply_equip_requests(
    mut requests: MessageReader<EquipWeapon>,
    mut q_player: Query<(&mut Arsenal, &mut Locomotion), With<Player>>,
    mut stopped: MessageWriter<ChargeStopped>,
) {
    let Ok((mut arsenal, mut loco)) = q_player.single_mut() else {
        requests.clear();
        return;
    };

    for &EquipWeapon(kind) in requests.read() {
        let previous = arsenal.equipped().map(|w| w.kind());
        if let (Some(Release::ChargeStopped), Some(weapon)) = (arsenal.equip(kind, &mut loco), previous) {
            stopped.write(ChargeStopped { weapon });
        }
    }
}

pub fn fire_equipped_weapon(
    time: Res<Time>,
    aim: Res<Aim>,
    mut intent: ResMut<PlayerIntent>,
    mut rng: ResMut<WeaponRng>,
    mut q_player: Query<(&Transform, &mut Locomotion, &mut Arsenal), With<Player>>,
    mut spawn: MessageWriter<SpawnProjectile>,
    mut fired: MessageWriter<ShotFired>,
    mut started: MessageWriter<ChargeStarted>,
    mut stopped: MessageWriter<ChargeStopped>,
) {
    let fire_released = std::mem::take(&mut intent.fire_released);

    let Ok((tf, mut loco, mut arsenal)) = q_player.single_mut() else {
        return;
    };
    let Some(weapon) = arsenal.equipped_mut() else {
        return;
    };
    let kind = weapon.kind();

    // No shooting mid-roll; a held trigger is released when the roll starts.
    if loco.is_rolling() {
        if weapon.stop_firing(&mut loco) == Release::ChargeStopped {
            stopped.write(ChargeStopped { weapon: kind });
        }
        return;
    }

    if intent.fire_held {
        let position = tf.translation.truncate();
        let pose = Pose {
            position,
            facing: loco.facing(),
        };
        let target = aim
            .world_point
            .unwrap_or(position + loco.facing() * FALLBACK_AIM_DISTANCE);

        let outcome = weapon.fire(&mut loco, pose, target, time.elapsed_secs(), &mut rng.0);

        if outcome.charge_started {
            started.write(ChargeStarted { weapon: kind });
        }
        if outcome.discharged {
            debug!("{kind:?} discharged {} projectile(s)", outcome.shots.len());
            fired.write(ShotFired {
                weapon: kind,
                projectiles: outcome.shots.len(),
            });
            spawn.write_batch(outcome.shots.into_iter().map(SpawnProjectile::from));
        }
    }

    if fire_released && weapon.stop_firing(&mut loco) == Release::ChargeStopped {
        stopped.write(ChargeStopped { weapon: kind });
    }
}

/// Pausing counts as letting go of the trigger.
pub fn release_trigger_on_pause(
    mut intent: ResMut<PlayerIntent>,
    mut q_player: Query<(&mut Locomotion, &mut Arsenal), With<Player>>,
    mut stopped: MessageWriter<ChargeStopped>,
) {
    intent.fire_held = false;
    intent.fire_released = false;

    for (mut loco, mut arsenal) in &mut q_player {
        let Some(weapon) = arsenal.equipped_mut() else {
            continue;
        };
        if weapon.stop_firing(&mut loco) == Release::ChargeStopped {
            stopped.write(ChargeStopped {
                weapon: weapon.kind(),
            });
        }
    }
}
