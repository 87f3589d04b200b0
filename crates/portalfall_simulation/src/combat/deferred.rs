//! Combat clock и очередь отложенных эффектов
//!
//! Вся "логическая конкурентность" боя (удар после замаха, сброс cooldown'а атаки,
//! завершение перезарядки): записи в одной очереди, привязанной к `CombatClock`.
//! Clock не идёт на паузе, поэтому очередь замирает вместе с ним.
//! Каждая запись перепроверяет свои предусловия в момент срабатывания.

use bevy::prelude::*;

/// Время боя (секунды). Продвигается только вне паузы.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct CombatClock {
    pub elapsed: f32,
}

impl CombatClock {
    pub fn now(&self) -> f32 {
        self.elapsed
    }

    pub fn advance(&mut self, delta: f32) {
        self.elapsed += delta;
    }
}

/// Что сделать в момент срабатывания
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredEffect {
    /// Удар адверсария долетел (перепроверка дистанции и жизни атакующего)
    AttackHit {
        attacker: Entity,
        target: Entity,
        damage: u32,
    },
    /// Адверсарий снова может атаковать
    ReleaseAttackCooldown { attacker: Entity },
    /// Перезарядка закончилась
    CompleteReload { shooter: Entity },
}

impl DeferredEffect {
    /// Entity, которой принадлежит эффект
    pub fn owner(&self) -> Entity {
        match *self {
            DeferredEffect::AttackHit { attacker, .. } => attacker,
            DeferredEffect::ReleaseAttackCooldown { attacker } => attacker,
            DeferredEffect::CompleteReload { shooter } => shooter,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledEffect {
    fire_at: f32,
    seq: u64,
    effect: DeferredEffect,
}

/// Очередь отложенных эффектов
///
/// Порядок срабатывания: (fire_at, порядок постановки).
#[derive(Resource, Debug, Default)]
pub struct DeferredEffects {
    pending: Vec<ScheduledEffect>,
    next_seq: u64,
}

impl DeferredEffects {
    pub fn schedule(&mut self, now: f32, delay: f32, effect: DeferredEffect) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledEffect {
            fire_at: now + delay.max(0.0),
            seq,
            effect,
        });
    }

    /// Забирает все эффекты с fire_at ≤ now (в порядке срабатывания)
    pub fn take_due(&mut self, now: f32) -> Vec<DeferredEffect> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|scheduled| scheduled.fire_at <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|scheduled| scheduled.effect).collect()
    }

    /// Сколько эффектов ждёт для entity
    pub fn pending_for(&self, owner: Entity) -> usize {
        self.pending
            .iter()
            .filter(|scheduled| scheduled.effect.owner() == owner)
            .count()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
