//! Урон по адверсариям: hit-реакции, смерть, выпадение мозга

use bevy::prelude::*;

use crate::ai::{brain_impulse, AdversaryConfig, AdversaryHit, AdversaryState, AdversaryVitals};
use crate::combat::{
    AdversaryKilled, AnimationCue, AnimationCueKind, CombatClock, DamageRequest, Damageable, Dead,
    DespawnAfter, HitKind, KillScore, PickupSpawned,
};
use crate::components::{DamageCapability, MovementIntent, Pickup, PickupImpulse, PickupKind};
use crate::logger::{log, log_info};
use crate::DeterministicRng;

/// Система: `DamageRequest` → адверсарии
///
/// Смерть (обычная или headshot): состояние Dead, движение ноль, death cue,
/// `AdversaryKilled` + `KillScore`, удаление через destroy_delay.
/// Headshot дополнительно роняет мозг в точке попадания (один раз).
pub fn apply_adversary_damage(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    clock: Res<CombatClock>,
    mut rng: ResMut<DeterministicRng>,
    mut kill_score: ResMut<KillScore>,
    mut adversaries: Query<(
        &mut AdversaryVitals,
        &mut AdversaryState,
        &mut MovementIntent,
        &AdversaryConfig,
        &DamageCapability,
    )>,
    mut animation_cues: EventWriter<AnimationCue>,
    mut killed_events: EventWriter<AdversaryKilled>,
    mut pickup_events: EventWriter<PickupSpawned>,
) {
    for request in requests.read() {
        let entity = request.target;
        let Ok((mut vitals, mut state, mut intent, config, capability)) =
            adversaries.get_mut(entity)
        else {
            continue;
        };
        if *capability != DamageCapability::Adversary {
            continue;
        }

        // Some(headshot) = умер от этого запроса
        let mut death: Option<bool> = None;
        let mut brain_at: Option<Vec3> = None;

        match request.kind {
            HitKind::Body => match vitals.take_damage(request.amount) {
                None => {
                    log(&format!(
                        "Adversary {:?}: damage {} ignored (dead or non-positive)",
                        entity, request.amount
                    ));
                }
                Some(AdversaryHit::Light) => {
                    animation_cues.write(AnimationCue {
                        entity,
                        kind: AnimationCueKind::LightHit,
                    });
                }
                Some(AdversaryHit::Hard) => {
                    animation_cues.write(AnimationCue {
                        entity,
                        kind: AnimationCueKind::HardHit,
                    });
                }
                Some(AdversaryHit::Killed) => death = Some(false),
            },
            HitKind::Headshot { hit_point } => {
                let outcome = vitals.headshot();
                if outcome.killed {
                    death = Some(true);
                }
                if outcome.drop_brain {
                    brain_at = Some(hit_point);
                }
            }
        }

        if let Some(headshot) = death {
            log_info(&format!("Adversary {:?} died (headshot: {})", entity, headshot));

            *state = AdversaryState::Dead;
            intent.stop();
            commands
                .entity(entity)
                .try_insert((Dead, DespawnAfter::at(clock.now(), config.destroy_delay)));

            animation_cues.write(AnimationCue {
                entity,
                kind: if headshot {
                    AnimationCueKind::HeadshotDeath
                } else {
                    AnimationCueKind::Death
                },
            });
            killed_events.write(AdversaryKilled { entity, headshot });
            kill_score.add_kill(headshot);
        }

        if let Some(position) = brain_at {
            let impulse = brain_impulse(&mut rng.rng, config.brain_force);
            let brain = commands
                .spawn((
                    Pickup::new(PickupKind::Brain, 1),
                    PickupImpulse(impulse),
                    Transform::from_translation(position),
                ))
                .id();

            log(&format!("Adversary {:?} dropped brain {:?}", entity, brain));
            pickup_events.write(PickupSpawned {
                entity: brain,
                kind: PickupKind::Brain,
                position,
                impulse,
            });
        }
    }
}
