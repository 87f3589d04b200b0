//! Combat tuning (data-driven)
//!
//! Все числа баланса в одном месте: игрок, адверсарии, порталы, оружие.
//! Загружается из TOML; отсутствующие секции и поля берутся из default.
//!
//! ```toml
//! [adversary]
//! sight_range = 20.0
//!
//! [portal]
//! max_alive_adversaries = 8
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::AdversaryConfig;

/// Ошибки загрузки tuning'а
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Ledger игрока (health + armor tiers + стартовые расходники)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: u32,
    /// Щит за вестку
    pub vest_shield: u32,
    /// Щит за вестку + шлем (он же значение debug-чита)
    pub vest_helmet_shield: u32,
    pub starting_medkits: u32,
    /// Радиус подбора pickup'ов
    pub interact_distance: f32,
    /// Радиус входа в активный exit
    pub exit_interact_distance: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            vest_shield: 50,
            vest_helmet_shield: 100,
            starting_medkits: 0,
            interact_distance: 2.0,
            exit_interact_distance: 2.5,
        }
    }
}

/// Hitscan оружие игрока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct WeaponTuning {
    /// Урон одного попадания (по телу/порталу)
    pub damage: f32,
    /// Дальность луча (метры)
    pub range: f32,
    /// Выстрелов в секунду
    pub fire_rate: f32,
    pub magazine_capacity: u32,
    pub max_reserve: u32,
    /// Длительность reload (анимация внешняя, ждём фиксированное время)
    pub reload_duration: f32,
    /// Урон в голову: всегда летальный, damage оружия не учитывается
    pub headshot_damage: u32,
    pub infinite_ammo: bool,
    /// Generic impact cue в точке попадания
    pub impact_effect: bool,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            damage: 25.0,
            range: 100.0,
            fire_rate: 10.0,
            magazine_capacity: 30,
            max_reserve: 90,
            reload_duration: 1.5,
            headshot_damage: 1000,
            infinite_ammo: false,
            impact_effect: true,
        }
    }
}

/// Портал-спавнер
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PortalTuning {
    pub max_health: f32,
    /// Интервал спавна при полном здоровье
    pub base_spawn_interval: f32,
    /// Интервал спавна при нулевом здоровье
    pub min_spawn_interval: f32,
    pub max_alive_adversaries: usize,
    /// Задержка удаления после разрушения
    pub removal_delay: f32,
    /// `{destroyed}` и `{total}` подставляются
    pub objective_format: String,
}

impl Default for PortalTuning {
    fn default() -> Self {
        Self {
            max_health: 400.0,
            base_spawn_interval: 6.0,
            min_spawn_interval: 1.5,
            max_alive_adversaries: 20,
            removal_delay: 2.0,
            objective_format: "Defeat portals {destroyed}/{total}".to_string(),
        }
    }
}

/// Весь баланс уровня
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct CombatTuning {
    pub player: PlayerTuning,
    pub weapon: WeaponTuning,
    pub adversary: AdversaryConfig,
    pub portal: PortalTuning,
}

impl CombatTuning {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let tuning: CombatTuning = toml::from_str(content)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Проверяет согласованность чисел (диапазоны, порядок радиусов)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.adversary;
        if !(a.bite_range <= a.attack_range && a.attack_range <= a.sight_range) {
            return Err(ConfigError::Invalid(format!(
                "adversary ranges must satisfy bite <= attack <= sight (got {} / {} / {})",
                a.bite_range, a.attack_range, a.sight_range
            )));
        }
        if a.max_health == 0 {
            return Err(ConfigError::Invalid("adversary max_health must be > 0".into()));
        }
        if a.attack_hit_delay < 0.0 || a.time_between_attacks <= 0.0 {
            return Err(ConfigError::Invalid(
                "adversary attack timings must be positive".into(),
            ));
        }

        let p = &self.portal;
        if p.max_health <= 0.0 {
            return Err(ConfigError::Invalid("portal max_health must be > 0".into()));
        }
        if p.min_spawn_interval <= 0.0 || p.min_spawn_interval > p.base_spawn_interval {
            return Err(ConfigError::Invalid(format!(
                "portal spawn intervals must satisfy 0 < min <= base (got {} / {})",
                p.min_spawn_interval, p.base_spawn_interval
            )));
        }

        let w = &self.weapon;
        if w.fire_rate <= 0.0 {
            return Err(ConfigError::Invalid("weapon fire_rate must be > 0".into()));
        }
        if w.magazine_capacity == 0 {
            return Err(ConfigError::Invalid(
                "weapon magazine_capacity must be > 0".into(),
            ));
        }

        if self.player.max_health == 0 {
            return Err(ConfigError::Invalid("player max_health must be > 0".into()));
        }

        Ok(())
    }
}
