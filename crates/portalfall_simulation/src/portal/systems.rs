//! Portal systems: регистрация, спавн, урон и разрушение

use bevy::prelude::*;

use crate::ai::{spawn_adversary, AdversaryVitals};
use crate::combat::{
    CombatClock, DamageRequest, Damageable, Dead, DespawnAfter, EffectCue, EffectKind,
};
use crate::components::{DamageCapability, HitVolumes};
use crate::config::CombatTuning;
use crate::logger::{log, log_info};
use crate::portal::{
    ExitActivated, ExitGate, LevelObjective, ObjectiveUpdated, PortalCore, PortalHit, PortalRoster,
};

fn spawn_transform(portal: &Transform, core: &PortalCore) -> Transform {
    Transform::from_translation(portal.translation + portal.rotation * core.spawn_offset)
        .with_rotation(portal.rotation)
}

/// Система: новый портал → в objective
///
/// Фаза Input не стоит на паузе: портал учтён раньше, чем до него дойдёт
/// любой `DamageRequest`.
pub fn register_new_portals(
    mut objective: ResMut<LevelObjective>,
    portals: Query<(Entity, &PortalCore), Added<PortalCore>>,
    mut objective_events: EventWriter<ObjectiveUpdated>,
) {
    let mut registered = false;

    for (entity, core) in portals.iter() {
        if core.is_destroyed() {
            continue;
        }

        objective.register_portal();
        registered = true;
        log_info(&format!("Portal {:?} registered", entity));
    }

    if registered {
        objective_events.write(ObjectiveUpdated::from_objective(&objective));
    }
}

/// Система: таймер спавна каждого живого портала
///
/// Новый портал сразу выпускает одного адверсария. Мёртвые и удалённые
/// адверсарии выбывают из ростера; при полном ростере таймер стоит.
pub fn tick_portal_spawners(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    mut portals: Query<(Entity, &Transform, &mut PortalCore, &mut PortalRoster)>,
    adversaries: Query<&AdversaryVitals>,
) {
    let delta = time.delta_secs();

    for (entity, transform, mut core, mut roster) in portals.iter_mut() {
        if core.is_destroyed() {
            continue;
        }

        if !core.is_open() {
            let adversary = spawn_adversary(
                &mut commands,
                spawn_transform(transform, &core),
                &tuning.adversary,
            );
            roster.0.push(adversary);
            core.open();
            log_info(&format!("Portal {:?} opened, first adversary {:?}", entity, adversary));
            continue;
        }

        roster
            .0
            .retain(|adversary| adversaries.get(*adversary).is_ok_and(|vitals| !vitals.is_dead()));

        if roster.0.len() >= core.max_alive {
            continue;
        }

        if core.tick_countdown(delta) {
            let adversary = spawn_adversary(
                &mut commands,
                spawn_transform(transform, &core),
                &tuning.adversary,
            );
            roster.0.push(adversary);

            log(&format!(
                "Portal {:?} spawned {:?} ({} alive, next in {:.2}s)",
                entity,
                adversary,
                roster.0.len(),
                core.countdown
            ));
        }
    }
}

/// Система: `DamageRequest` → порталы
///
/// Разрушение: objective +1, HUD, VFX, hit volumes убираются сразу,
/// entity удаляется через removal_delay. Последний портал активирует exit.
pub fn apply_portal_damage(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    clock: Res<CombatClock>,
    mut objective: ResMut<LevelObjective>,
    mut portals: Query<(&mut PortalCore, &Transform, &DamageCapability)>,
    mut exits: Query<(Entity, &mut ExitGate)>,
    mut effect_cues: EventWriter<EffectCue>,
    mut objective_events: EventWriter<ObjectiveUpdated>,
    mut exit_events: EventWriter<ExitActivated>,
) {
    for request in requests.read() {
        let entity = request.target;
        let Ok((mut core, transform, capability)) = portals.get_mut(entity) else {
            continue;
        };
        if *capability != DamageCapability::Portal {
            continue;
        }

        match core.take_damage(request.amount) {
            None => {
                log(&format!("Portal {:?}: damage {} ignored", entity, request.amount));
            }
            Some(PortalHit::Damaged) => {
                log(&format!(
                    "Portal {:?}: {:.0}/{:.0}, next spawn in {:.2}s",
                    entity, core.integrity, core.max_integrity, core.countdown
                ));
                effect_cues.write(EffectCue {
                    kind: EffectKind::PortalHit,
                    position: transform.translation,
                    normal: Vec3::Y,
                });
            }
            Some(PortalHit::Destroyed) => {
                objective.portal_destroyed();
                log_info(&format!(
                    "Portal {:?} destroyed ({}/{})",
                    entity,
                    objective.destroyed,
                    objective.total()
                ));

                objective_events.write(ObjectiveUpdated::from_objective(&objective));
                effect_cues.write(EffectCue {
                    kind: EffectKind::PortalDestroyed,
                    position: transform.translation,
                    normal: Vec3::Y,
                });

                commands
                    .entity(entity)
                    .try_insert((Dead, DespawnAfter::at(clock.now(), core.removal_delay)))
                    .try_remove::<HitVolumes>();

                if objective.try_activate_exit() {
                    for (exit, mut gate) in exits.iter_mut() {
                        gate.active = true;
                        exit_events.write(ExitActivated { exit });
                    }
                    log_info("All portals destroyed, exit activated");
                }
            }
        }
    }
}
