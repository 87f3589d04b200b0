//! Hitscan оружие игрока: rate limit, магазин/резерв, перезарядка, отдача
//!
//! Поток выстрела:
//! 1. `FireIntent` (одиночный) или зажатый `TriggerState` → попытка выстрела
//! 2. `Firearm::try_fire` → rate limit + патрон
//! 3. Ray query из `AimRay` → максимум одно попадание
//! 4. Head volume → headshot владельца-адверсария, иначе `DamageRequest` первому
//!    Damageable в цепочке collider → owner

use bevy::prelude::*;

use crate::config::WeaponTuning;

/// Оружие (hitscan)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Firearm {
    /// Урон по телу / порталу
    pub damage: f32,
    /// Дальность луча
    pub range: f32,
    /// Выстрелов в секунду
    pub fire_rate: f32,
    /// Не раньше этого момента (combat clock)
    pub next_fire_time: f32,
    pub infinite_ammo: bool,
    /// Урон headshot'а (летальный)
    pub headshot_damage: u32,
    pub reload_duration: f32,
    /// Идёт перезарядка (стрелять нельзя)
    pub reloading: bool,
    /// Generic impact cue
    pub impact_effect: bool,
}

impl Default for Firearm {
    fn default() -> Self {
        Self::from_tuning(&WeaponTuning::default())
    }
}

/// Почему выстрел (не) состоялся
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireGate {
    Fired,
    RateLimited,
    EmptyMagazine,
    Reloading,
}

impl Firearm {
    pub fn from_tuning(tuning: &WeaponTuning) -> Self {
        Self {
            damage: tuning.damage,
            range: tuning.range,
            fire_rate: tuning.fire_rate,
            next_fire_time: 0.0,
            infinite_ammo: tuning.infinite_ammo,
            headshot_damage: tuning.headshot_damage,
            reload_duration: tuning.reload_duration,
            reloading: false,
            impact_effect: tuning.impact_effect,
        }
    }

    pub fn fire_interval(&self) -> f32 {
        1.0 / self.fire_rate
    }

    /// Пытается выстрелить в момент `now`
    ///
    /// Пустой магазин не сдвигает rate limit.
    pub fn try_fire(&mut self, now: f32, ammo: &mut Ammo) -> FireGate {
        if self.reloading {
            return FireGate::Reloading;
        }
        if now < self.next_fire_time {
            return FireGate::RateLimited;
        }
        if !self.infinite_ammo && !ammo.try_consume_bullet() {
            return FireGate::EmptyMagazine;
        }

        self.next_fire_time = now + self.fire_interval();
        FireGate::Fired
    }
}

/// Магазин + резерв
///
/// Инварианты: magazine ≤ capacity, reserve ≤ max_reserve
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Ammo {
    pub magazine: u32,
    pub capacity: u32,
    pub reserve: u32,
    pub max_reserve: u32,
}

impl Default for Ammo {
    fn default() -> Self {
        Self::full(30, 90)
    }
}

impl Ammo {
    /// Полный магазин и полный резерв
    pub fn full(capacity: u32, max_reserve: u32) -> Self {
        Self {
            magazine: capacity,
            capacity,
            reserve: max_reserve,
            max_reserve,
        }
    }

    pub fn from_tuning(tuning: &WeaponTuning) -> Self {
        Self::full(tuning.magazine_capacity, tuning.max_reserve)
    }

    pub fn try_consume_bullet(&mut self) -> bool {
        if self.magazine == 0 {
            return false;
        }
        self.magazine -= 1;
        true
    }

    pub fn can_reload(&self) -> bool {
        self.magazine < self.capacity && self.reserve > 0
    }

    /// Доливает магазин из резерва. Returns сколько патронов переложено.
    pub fn reload(&mut self) -> u32 {
        if !self.can_reload() {
            return 0;
        }

        let moved = (self.capacity - self.magazine).min(self.reserve);
        self.reserve -= moved;
        self.magazine += moved;
        moved
    }

    /// Pickup патронов (clamp по max_reserve). Returns реально добавленное.
    pub fn add_reserve(&mut self, amount: u32) -> u32 {
        let before = self.reserve;
        self.reserve = self.reserve.saturating_add(amount).min(self.max_reserve);
        self.reserve - before
    }

    /// Debug setter (clamp в границы)
    pub fn set_ammo(&mut self, magazine: u32, reserve: u32) {
        self.magazine = magazine.min(self.capacity);
        self.reserve = reserve.min(self.max_reserve);
    }
}

/// Зажат ли спуск (автоогонь каждый tick, пока держим)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TriggerState {
    pub held: bool,
}

/// Косметическая отдача (затухает по real time, живёт и на паузе)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WeaponRecoil {
    /// Текущий угол отдачи (градусы)
    pub kick: f32,
    pub kick_per_shot: f32,
    pub max_kick: f32,
    /// Градусов в секунду
    pub recovery_rate: f32,
}

impl Default for WeaponRecoil {
    fn default() -> Self {
        Self {
            kick: 0.0,
            kick_per_shot: 1.5,
            max_kick: 8.0,
            recovery_rate: 20.0,
        }
    }
}

impl WeaponRecoil {
    pub fn apply_shot(&mut self) {
        self.kick = (self.kick + self.kick_per_shot).min(self.max_kick);
    }

    pub fn recover(&mut self, delta: f32) {
        self.kick = (self.kick - self.recovery_rate * delta).max(0.0);
    }
}

/// Event: одиночная попытка выстрела
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FireIntent {
    pub shooter: Entity,
}

/// Event: спуск нажат / отпущен
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TriggerIntent {
    pub shooter: Entity,
    pub held: bool,
}

/// Event: начать перезарядку
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ReloadIntent {
    pub shooter: Entity,
}
