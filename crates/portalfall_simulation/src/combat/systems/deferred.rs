//! Combat clock + срабатывание отложенных эффектов

use bevy::prelude::*;

use crate::ai::{AdversaryConfig, AdversaryVitals, AttackState};
use crate::combat::{
    AmmoChanged, Ammo, CombatClock, DamageRequest, Damageable, Dead, DeferredEffect,
    DeferredEffects, Firearm, PlayerLedger,
};
use crate::logger::log;

/// Система: продвигает combat clock на fixed delta (вне паузы)
pub fn advance_combat_clock(time: Res<Time>, mut clock: ResMut<CombatClock>) {
    clock.advance(time.delta_secs());
}

/// Система: выполняет эффекты, чьё время пришло
///
/// Каждый эффект перепроверяет мир в момент срабатывания:
/// - удар адверсария отменяется, если он умер или цель ушла дальше
///   attack_range + slack
/// - перезарядка у мёртвого стрелка только снимает флаг
pub fn run_deferred_effects(
    clock: Res<CombatClock>,
    mut queue: ResMut<DeferredEffects>,
    mut adversaries: Query<(&AdversaryVitals, &mut AttackState, &AdversaryConfig, &Transform)>,
    targets: Query<&Transform>,
    mut shooters: Query<(&mut Firearm, &mut Ammo, Option<&PlayerLedger>, Has<Dead>)>,
    mut damage_requests: EventWriter<DamageRequest>,
    mut ammo_events: EventWriter<AmmoChanged>,
) {
    for effect in queue.take_due(clock.now()) {
        match effect {
            DeferredEffect::AttackHit {
                attacker,
                target,
                damage,
            } => {
                let Ok((vitals, mut attack, config, transform)) = adversaries.get_mut(attacker)
                else {
                    log(&format!("Deferred hit dropped: attacker {:?} gone", attacker));
                    continue;
                };
                attack.hit_pending = false;

                if vitals.is_dead() {
                    log(&format!("Deferred hit dropped: attacker {:?} is dead", attacker));
                    continue;
                }

                let Ok(target_transform) = targets.get(target) else {
                    log(&format!("Deferred hit dropped: target {:?} gone", target));
                    continue;
                };

                let distance = transform.translation.distance(target_transform.translation);
                if distance > config.attack_range + config.hit_slack {
                    log(&format!(
                        "Deferred hit dropped: {:?} out of reach ({:.2}m)",
                        target, distance
                    ));
                    continue;
                }

                damage_requests.write(DamageRequest::body(target, damage as f32, Some(attacker)));
            }

            DeferredEffect::ReleaseAttackCooldown { attacker } => {
                if let Ok((_, mut attack, _, _)) = adversaries.get_mut(attacker) {
                    attack.cooling_down = false;
                }
            }

            DeferredEffect::CompleteReload { shooter } => {
                let Ok((mut firearm, mut ammo, ledger, dead_marker)) = shooters.get_mut(shooter)
                else {
                    continue;
                };
                firearm.reloading = false;

                if dead_marker || ledger.is_some_and(|ledger| ledger.is_dead()) {
                    continue;
                }

                let moved = ammo.reload();
                log(&format!(
                    "Reload complete for {:?}: +{} → {}/{}",
                    shooter, moved, ammo.magazine, ammo.reserve
                ));
                ammo_events.write(AmmoChanged {
                    entity: shooter,
                    magazine: ammo.magazine,
                    reserve: ammo.reserve,
                });
            }
        }
    }
}
