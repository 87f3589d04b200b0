//! Adversary FSM: состояния, параметры, здоровье, выбор поведения

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::Damageable;
use crate::components::Health;

/// Состояние адверсария
///
/// Dead терминально: из него переходов нет.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum AdversaryState {
    /// Цель дальше sight_range (или цели нет)
    #[default]
    Idle,
    /// Цель в пределах sight_range, идём к ней
    Chasing,
    /// Цель в пределах attack_range, стоим и бьём
    Attacking,
    Dead,
}

/// Параметры адверсария
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct AdversaryConfig {
    pub sight_range: f32,
    pub attack_range: f32,
    /// Ближе этого: только bite
    pub bite_range: f32,
    pub walk_speed: f32,
    /// Cooldown между атаками (секунды)
    pub time_between_attacks: f32,
    /// Задержка от замаха до удара
    pub attack_hit_delay: f32,
    pub light_attack_damage: u32,
    pub hard_attack_damage: u32,
    pub bite_damage: u32,
    pub max_health: u32,
    /// Входящий урон ≥ порога → hard hit реакция
    pub hard_hit_threshold: u32,
    /// Удаление трупа через N секунд
    pub destroy_delay: f32,
    /// Сила импульса выпавшего мозга
    pub brain_force: f32,
    /// Запас дистанции при проверке отложенного удара
    pub hit_slack: f32,
}

impl Default for AdversaryConfig {
    fn default() -> Self {
        Self {
            sight_range: 15.0,
            attack_range: 2.5,
            bite_range: 1.2,
            walk_speed: 1.2,
            time_between_attacks: 1.5,
            attack_hit_delay: 0.5,
            light_attack_damage: 15,
            hard_attack_damage: 25,
            bite_damage: 35,
            max_health: 100,
            hard_hit_threshold: 30,
            destroy_delay: 10.0,
            brain_force: 4.0,
            hit_slack: 0.5,
        }
    }
}

/// Вариант атаки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AttackVariant {
    Bite,
    Light,
    Hard,
}

impl AttackVariant {
    pub fn damage(&self, config: &AdversaryConfig) -> u32 {
        match self {
            AttackVariant::Bite => config.bite_damage,
            AttackVariant::Light => config.light_attack_damage,
            AttackVariant::Hard => config.hard_attack_damage,
        }
    }
}

/// Выбор поведения по дистанции до цели (границы включительно)
pub fn select_behavior(distance: f32, config: &AdversaryConfig) -> AdversaryState {
    if distance <= config.attack_range {
        AdversaryState::Attacking
    } else if distance <= config.sight_range {
        AdversaryState::Chasing
    } else {
        AdversaryState::Idle
    }
}

/// Bite вплотную, иначе light/hard 50/50
pub fn choose_attack(
    distance: f32,
    config: &AdversaryConfig,
    rng: &mut impl Rng,
) -> AttackVariant {
    if distance <= config.bite_range {
        AttackVariant::Bite
    } else if rng.gen_bool(0.5) {
        AttackVariant::Light
    } else {
        AttackVariant::Hard
    }
}

/// Импульс выпавшего мозга: вверх с разбросом
pub fn brain_impulse(rng: &mut impl Rng, force: f32) -> Vec3 {
    // rejection sampling: точка внутри единичной сферы
    let scatter = loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            break candidate;
        }
    };

    (Vec3::Y + scatter * 0.4).normalize_or(Vec3::Y) * force
}

/// Cooldown атаки
///
/// Новая атака только когда cooldown снят и прошлый удар уже сработал:
/// в полёте максимум один удар даже при cooldown короче задержки удара.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct AttackState {
    pub cooling_down: bool,
    /// Отложенный удар ещё не сработал
    pub hit_pending: bool,
}

impl AttackState {
    pub fn can_attack(&self) -> bool {
        !self.cooling_down && !self.hit_pending
    }
}

/// Реакция на урон по телу
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdversaryHit {
    Light,
    Hard,
    Killed,
}

/// Результат headshot'а
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadshotOutcome {
    /// Этот headshot убил (false если уже был мёртв)
    pub killed: bool,
    /// Мозг выпадает (один раз за жизнь entity)
    pub drop_brain: bool,
}

/// Здоровье адверсария (без shield'а)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AdversaryVitals {
    pub health: Health,
    pub hard_hit_threshold: u32,
    dead: bool,
    brain_dropped: bool,
}

impl Default for AdversaryVitals {
    fn default() -> Self {
        Self::from_config(&AdversaryConfig::default())
    }
}

impl AdversaryVitals {
    pub fn from_config(config: &AdversaryConfig) -> Self {
        Self {
            health: Health::new(config.max_health),
            hard_hit_threshold: config.hard_hit_threshold,
            dead: false,
            brain_dropped: false,
        }
    }

    /// Headshot: летально независимо от урона
    ///
    /// Мозг выпадает даже у уже мёртвого тела, но не больше одного раза.
    pub fn headshot(&mut self) -> HeadshotOutcome {
        let killed = !self.dead;
        if killed {
            self.health.deplete();
            self.dead = true;
        }

        let drop_brain = !self.brain_dropped;
        self.brain_dropped = true;

        HeadshotOutcome { killed, drop_brain }
    }

    pub fn brain_dropped(&self) -> bool {
        self.brain_dropped
    }
}

impl Damageable for AdversaryVitals {
    type Outcome = AdversaryHit;

    fn take_damage(&mut self, amount: f32) -> Option<AdversaryHit> {
        if self.dead {
            return None;
        }

        let rounded = amount.round();
        if !(rounded > 0.0) {
            return None;
        }
        let damage = rounded as u32;

        self.health.take_damage(damage);

        if !self.health.is_alive() {
            self.dead = true;
            return Some(AdversaryHit::Killed);
        }

        if damage >= self.hard_hit_threshold {
            Some(AdversaryHit::Hard)
        } else {
            Some(AdversaryHit::Light)
        }
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
