//! Portal components: здоровье, таймер спавна, ростер живых адверсариев

use bevy::prelude::*;

use crate::combat::Damageable;
use crate::components::{DamageCapability, HitVolumes};
use crate::config::PortalTuning;

/// Портал-спавнер
///
/// Чем меньше здоровья, тем чаще спавн: интервал линейно от min (0 hp) до base (full hp).
/// Урон дополнительно ускоряет ближайший спавн. Разрушение терминально.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PortalCore {
    pub integrity: f32,
    pub max_integrity: f32,
    /// Секунд до следующего спавна
    pub countdown: f32,
    pub base_interval: f32,
    pub min_interval: f32,
    pub max_alive: usize,
    pub removal_delay: f32,
    /// Точка спавна относительно портала
    pub spawn_offset: Vec3,
    /// Первый адверсарий уже выпущен
    opened: bool,
    destroyed: bool,
}

impl Default for PortalCore {
    fn default() -> Self {
        Self::from_tuning(&PortalTuning::default())
    }
}

/// Результат урона по порталу
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalHit {
    Damaged,
    Destroyed,
}

impl PortalCore {
    pub fn from_tuning(tuning: &PortalTuning) -> Self {
        Self {
            integrity: tuning.max_health,
            max_integrity: tuning.max_health,
            countdown: tuning.base_spawn_interval,
            base_interval: tuning.base_spawn_interval,
            min_interval: tuning.min_spawn_interval,
            max_alive: tuning.max_alive_adversaries,
            removal_delay: tuning.removal_delay,
            spawn_offset: Vec3::ZERO,
            opened: false,
            destroyed: false,
        }
    }

    pub fn with_spawn_offset(mut self, offset: Vec3) -> Self {
        self.spawn_offset = offset;
        self
    }

    /// lerp(min, base, integrity / max)
    pub fn spawn_interval(&self) -> f32 {
        let fraction = if self.max_integrity > 0.0 {
            (self.integrity / self.max_integrity).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.min_interval + (self.base_interval - self.min_interval) * fraction
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Первый адверсарий выпущен, дальше работает таймер
    pub fn open(&mut self) {
        self.opened = true;
    }

    /// Tick таймера. true = пора спавнить (countdown уже перезаведён).
    pub fn tick_countdown(&mut self, delta: f32) -> bool {
        self.countdown -= delta;
        if self.countdown <= 0.0 {
            self.countdown = self.spawn_interval();
            return true;
        }
        false
    }
}

impl Damageable for PortalCore {
    type Outcome = PortalHit;

    fn take_damage(&mut self, amount: f32) -> Option<PortalHit> {
        if self.destroyed || !(amount > 0.0) {
            return None;
        }

        self.integrity = (self.integrity - amount).max(0.0);

        if self.integrity > 0.0 {
            // Подранили: следующий спавн не позже половины нового интервала
            self.countdown = self.countdown.min(self.spawn_interval() * 0.5);
            Some(PortalHit::Damaged)
        } else {
            self.destroyed = true;
            Some(PortalHit::Destroyed)
        }
    }

    fn is_dead(&self) -> bool {
        self.destroyed
    }
}

/// Живые адверсарии этого портала
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PortalRoster(pub Vec<Entity>);

/// Полный набор компонентов портала
pub fn portal_bundle(transform: Transform, core: PortalCore) -> impl Bundle {
    (
        core,
        PortalRoster::default(),
        transform,
        DamageCapability::Portal,
        HitVolumes::single(1.5),
    )
}
