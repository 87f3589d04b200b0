//! FSM transitions + attack scheduling

use bevy::prelude::*;

use crate::ai::{
    choose_attack, select_behavior, AdversaryConfig, AdversaryState, AdversaryVitals, AttackState,
};
use crate::combat::{
    AnimationCue, AnimationCueKind, CombatClock, Damageable, DeferredEffect, DeferredEffects,
};
use crate::components::{Adversary, MovementIntent, Player};
use crate::DeterministicRng;

/// Поворот к цели в горизонтальной плоскости
fn face_horizontally(transform: &mut Transform, toward: Vec3) {
    let flat = Vec3::new(toward.x, 0.0, toward.z);
    if flat.length_squared() > 1e-6 {
        transform.look_to(flat, Vec3::Y);
    }
}

/// Система: выбор поведения каждого живого адверсария
///
/// - Attacking: стоим, смотрим на цель, атакуем если нет cooldown'а
/// - Chasing: горизонтальное направление на цель
/// - Idle: стоим (и когда игрока нет вовсе)
///
/// Атака = animation cue сейчас + `AttackHit` через attack_hit_delay +
/// `ReleaseAttackCooldown` через time_between_attacks.
pub fn update_adversary_behavior(
    clock: Res<CombatClock>,
    mut rng: ResMut<DeterministicRng>,
    mut deferred: ResMut<DeferredEffects>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Adversary>)>,
    mut adversaries: Query<
        (
            Entity,
            &mut Transform,
            &mut AdversaryState,
            &mut MovementIntent,
            &mut AttackState,
            &AdversaryConfig,
            &AdversaryVitals,
        ),
        With<Adversary>,
    >,
    mut animation_cues: EventWriter<AnimationCue>,
) {
    let target = players.single().ok();
    let now = clock.now();

    for (entity, mut transform, mut state, mut intent, mut attack, config, vitals) in
        adversaries.iter_mut()
    {
        if vitals.is_dead() {
            if *state != AdversaryState::Dead {
                *state = AdversaryState::Dead;
            }
            if intent.is_moving() {
                intent.stop();
            }
            continue;
        }

        let Some((target_entity, target_transform)) = target else {
            if *state != AdversaryState::Idle {
                *state = AdversaryState::Idle;
            }
            if intent.is_moving() {
                intent.stop();
            }
            continue;
        };

        let to_target = target_transform.translation - transform.translation;
        let distance = to_target.length();
        let next = select_behavior(distance, config);
        if *state != next {
            crate::logger::log(&format!(
                "Adversary {:?}: {:?} → {:?} ({:.2}m)",
                entity, *state, next, distance
            ));
            *state = next;
        }

        match next {
            AdversaryState::Attacking => {
                intent.stop();
                face_horizontally(&mut transform, to_target);

                if attack.can_attack() {
                    let variant = choose_attack(distance, config, &mut rng.rng);

                    animation_cues.write(AnimationCue {
                        entity,
                        kind: AnimationCueKind::Attack(variant),
                    });
                    deferred.schedule(
                        now,
                        config.attack_hit_delay,
                        DeferredEffect::AttackHit {
                            attacker: entity,
                            target: target_entity,
                            damage: variant.damage(config),
                        },
                    );
                    deferred.schedule(
                        now,
                        config.time_between_attacks,
                        DeferredEffect::ReleaseAttackCooldown { attacker: entity },
                    );
                    attack.cooling_down = true;
                    attack.hit_pending = true;
                }
            }
            AdversaryState::Chasing => {
                let flat = Vec3::new(to_target.x, 0.0, to_target.z);
                intent.direction = flat.normalize_or_zero();
                face_horizontally(&mut transform, to_target);
            }
            AdversaryState::Idle | AdversaryState::Dead => {
                if intent.is_moving() {
                    intent.stop();
                }
            }
        }
    }
}
