//! Firing pipeline: trigger, reload, выстрел, hit resolution, отдача

use bevy::prelude::*;

use crate::combat::{
    AmmoChanged, Ammo, AnimationCue, AnimationCueKind, CombatClock, DamageRequest, Damageable,
    Dead, DeferredEffect, DeferredEffects, EffectCue, EffectKind, FireGate, FireIntent, Firearm,
    PlayerLedger, ReloadIntent, TriggerIntent, TriggerState, WeaponRecoil,
};
use crate::components::{
    AimRay, BloodSpray, ColliderOwner, DamageCapability, HitSurface, HitVolumes,
};
use crate::logger::log;
use crate::pause::PauseState;
use crate::physics::{cast_ray, damage_owner_chain, RayHit};

fn shooter_is_dead(ledger: Option<&PlayerLedger>, dead_marker: bool) -> bool {
    dead_marker || ledger.is_some_and(|ledger| ledger.is_dead())
}

/// Система: нажатие / отпускание спуска
///
/// Нажатие на паузе теряется, отпускание применяется всегда.
pub fn process_trigger_intents(
    mut intents: EventReader<TriggerIntent>,
    pause: Res<PauseState>,
    mut triggers: Query<&mut TriggerState>,
) {
    for intent in intents.read() {
        if intent.held && pause.paused {
            continue;
        }
        if let Ok(mut trigger) = triggers.get_mut(intent.shooter) {
            trigger.held = intent.held;
        }
    }
}

/// Система: старт перезарядки
///
/// Только если `can_reload` и перезарядка ещё не идёт. Отпускает спуск.
/// Завершение: `DeferredEffect::CompleteReload` через `reload_duration`.
pub fn process_reload_intents(
    mut intents: EventReader<ReloadIntent>,
    pause: Res<PauseState>,
    clock: Res<CombatClock>,
    mut deferred: ResMut<DeferredEffects>,
    mut shooters: Query<(
        &mut Firearm,
        &Ammo,
        Option<&mut TriggerState>,
        Option<&PlayerLedger>,
        Has<Dead>,
    )>,
    mut animation_cues: EventWriter<AnimationCue>,
) {
    for intent in intents.read() {
        if pause.paused {
            continue;
        }

        let Ok((mut firearm, ammo, trigger, ledger, dead_marker)) =
            shooters.get_mut(intent.shooter)
        else {
            continue;
        };

        if shooter_is_dead(ledger, dead_marker) {
            continue;
        }
        if firearm.reloading {
            log(&format!("Reload ignored for {:?}: already reloading", intent.shooter));
            continue;
        }
        if !ammo.can_reload() {
            log(&format!(
                "Reload ignored for {:?}: magazine full or reserve empty ({}/{})",
                intent.shooter, ammo.magazine, ammo.reserve
            ));
            continue;
        }

        firearm.reloading = true;
        if let Some(mut trigger) = trigger {
            trigger.held = false;
        }

        deferred.schedule(
            clock.now(),
            firearm.reload_duration,
            DeferredEffect::CompleteReload {
                shooter: intent.shooter,
            },
        );
        animation_cues.write(AnimationCue {
            entity: intent.shooter,
            kind: AnimationCueKind::Reload,
        });
    }
}

/// Что сделать с попаданием луча
///
/// Head volume → headshot первого адверсария в цепочке владельцев;
/// иначе обычный урон первому Damageable в цепочке; иначе ничего.
pub fn resolve_hit(
    hit: &RayHit,
    firearm: &Firearm,
    shooter: Entity,
    owners: &Query<&ColliderOwner>,
    capabilities: &Query<&DamageCapability>,
) -> Option<DamageRequest> {
    let chain = damage_owner_chain(hit.entity, owners);

    if hit.surface == HitSurface::Head {
        let adversary = chain
            .iter()
            .copied()
            .find(|entity| matches!(capabilities.get(*entity), Ok(DamageCapability::Adversary)));

        if let Some(adversary) = adversary {
            return Some(DamageRequest::headshot(
                adversary,
                firearm.headshot_damage as f32,
                hit.point,
                Some(shooter),
            ));
        }
    }

    chain
        .iter()
        .copied()
        .find(|entity| capabilities.contains(*entity))
        .map(|target| DamageRequest::body(target, firearm.damage, Some(shooter)))
}

/// Система: выстрелы
///
/// Попытка = одиночный `FireIntent` или зажатый спуск (одна на стрелка за tick).
/// На паузе и у мёртвого стрелка ничего не происходит.
pub fn fire_weapons(
    mut fire_intents: EventReader<FireIntent>,
    pause: Res<PauseState>,
    clock: Res<CombatClock>,
    mut shooters: Query<(
        Entity,
        &mut Firearm,
        &mut Ammo,
        &AimRay,
        Option<&TriggerState>,
        Option<&mut WeaponRecoil>,
        Option<&PlayerLedger>,
        Has<Dead>,
    )>,
    volumes: Query<(Entity, &Transform, &HitVolumes)>,
    owners: Query<&ColliderOwner>,
    capabilities: Query<&DamageCapability>,
    blood: Query<(), With<BloodSpray>>,
    mut damage_requests: EventWriter<DamageRequest>,
    mut effect_cues: EventWriter<EffectCue>,
    mut ammo_events: EventWriter<AmmoChanged>,
) {
    if pause.paused {
        fire_intents.clear();
        return;
    }

    let mut attempts: Vec<Entity> = Vec::new();
    for intent in fire_intents.read() {
        if !attempts.contains(&intent.shooter) {
            attempts.push(intent.shooter);
        }
    }
    for (entity, _, _, _, trigger, _, _, _) in shooters.iter() {
        if trigger.is_some_and(|trigger| trigger.held) && !attempts.contains(&entity) {
            attempts.push(entity);
        }
    }

    let now = clock.now();

    for shooter in attempts {
        let Ok((_, mut firearm, mut ammo, aim, _, recoil, ledger, dead_marker)) =
            shooters.get_mut(shooter)
        else {
            continue;
        };

        if shooter_is_dead(ledger, dead_marker) {
            continue;
        }

        match firearm.try_fire(now, &mut ammo) {
            FireGate::Fired => {}
            FireGate::EmptyMagazine => {
                log(&format!("{:?}: click, magazine empty", shooter));
                continue;
            }
            FireGate::RateLimited | FireGate::Reloading => continue,
        }

        if !firearm.infinite_ammo {
            ammo_events.write(AmmoChanged {
                entity: shooter,
                magazine: ammo.magazine,
                reserve: ammo.reserve,
            });
        }

        let direction = aim.direction.normalize_or_zero();
        effect_cues.write(EffectCue {
            kind: EffectKind::MuzzleFlash,
            position: aim.origin,
            normal: direction,
        });
        if let Some(mut recoil) = recoil {
            recoil.apply_shot();
        }

        let Some(hit) = cast_ray(
            aim.origin,
            direction,
            firearm.range,
            Some(shooter),
            volumes.iter(),
        ) else {
            continue;
        };

        if let Some(request) = resolve_hit(&hit, &firearm, shooter, &owners, &capabilities) {
            log(&format!(
                "{:?} hit {:?} ({:?}) at {:.1}m → {:?} for {}",
                shooter, hit.entity, hit.surface, hit.distance, request.target, request.amount
            ));
            damage_requests.write(request);
        } else {
            log(&format!("{:?} hit {:?}: nothing damageable", shooter, hit.entity));
        }

        let bleeds = damage_owner_chain(hit.entity, &owners)
            .into_iter()
            .any(|entity| blood.contains(entity));
        if bleeds {
            effect_cues.write(EffectCue {
                kind: EffectKind::BloodSpray,
                position: hit.point,
                normal: -direction,
            });
        }

        if firearm.impact_effect {
            effect_cues.write(EffectCue {
                kind: EffectKind::Impact,
                position: hit.point,
                normal: hit.normal,
            });
        }
    }
}

/// Система: затухание отдачи по real time (анимируется и на паузе)
pub fn decay_weapon_recoil(time: Res<Time<Real>>, mut recoils: Query<&mut WeaponRecoil>) {
    let delta = time.delta_secs();
    for mut recoil in recoils.iter_mut() {
        recoil.recover(delta);
    }
}
