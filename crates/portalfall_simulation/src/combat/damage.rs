//! Damageable контракт, запросы урона, смерть и уборка

use bevy::prelude::*;

/// Контракт всего, что принимает урон (ledger игрока, адверсарий, портал)
///
/// `None` = no-op: amount ≤ 0 или цель уже мертва/разрушена.
/// Cue-события шлёт система, применяющая урон, а не сам тип.
pub trait Damageable {
    type Outcome;

    fn take_damage(&mut self, amount: f32) -> Option<Self::Outcome>;

    fn is_dead(&self) -> bool;
}

/// Как пришёл урон
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum HitKind {
    /// Обычное попадание (тело, портал, удар адверсария)
    Body,
    /// Попадание в голову адверсария: летально всегда
    Headshot { hit_point: Vec3 },
}

/// Event: нанести урон entity
///
/// Маршрутизируется по `DamageCapability` цели.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
    pub kind: HitKind,
    pub source: Option<Entity>,
}

impl DamageRequest {
    pub fn body(target: Entity, amount: f32, source: Option<Entity>) -> Self {
        Self {
            target,
            amount,
            kind: HitKind::Body,
            source,
        }
    }

    pub fn headshot(target: Entity, amount: f32, hit_point: Vec3, source: Option<Entity>) -> Self {
        Self {
            target,
            amount,
            kind: HitKind::Headshot { hit_point },
            source,
        }
    }
}

/// Компонент-маркер: entity мертв / разрушен
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Время: по `CombatClock` (замирает на паузе).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    /// Время деспавна (секунды combat clock)
    pub despawn_time: f32,
}

impl DespawnAfter {
    pub fn at(now: f32, delay: f32) -> Self {
        Self {
            despawn_time: now + delay,
        }
    }
}
