//! Health/Shield ledger игрока
//!
//! Урон сначала снимает shield, остаток идёт в health. Armor покупается
//! один раз за жизнь (любой tier), debug-чит обходит это ограничение.
//! Смерть терминальна: ledger остаётся, но больше ничего не принимает.

use bevy::prelude::*;

use crate::combat::Damageable;
use crate::components::{Health, Inventory};
use crate::config::PlayerTuning;

/// Размер shield'а по tier'ам armor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct ArmorTiers {
    pub vest: u32,
    pub vest_and_helmet: u32,
}

impl Default for ArmorTiers {
    fn default() -> Self {
        Self {
            vest: 50,
            vest_and_helmet: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ArmorTier {
    Vest,
    VestAndHelmet,
}

/// Armor shield
///
/// Инвариант: 0 ≤ current ≤ tier, выбранный при покупке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct ArmorShield {
    pub current: u32,
    /// Armor уже куплен (one-shot)
    pub purchased: bool,
}

/// Результат урона по ledger'у
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerDamage {
    /// Поглощено shield'ом
    pub absorbed: u32,
    /// Снято с health
    pub health_lost: u32,
    /// Этот урон убил игрока (ровно один раз)
    pub killed: bool,
}

/// Health/Shield ledger игрока
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerLedger {
    pub health: Health,
    pub shield: ArmorShield,
    pub tiers: ArmorTiers,
    dead: bool,
}

impl Default for PlayerLedger {
    fn default() -> Self {
        Self::new(100, ArmorTiers::default())
    }
}

impl PlayerLedger {
    pub fn new(max_health: u32, tiers: ArmorTiers) -> Self {
        Self {
            health: Health::new(max_health),
            shield: ArmorShield::default(),
            tiers,
            dead: false,
        }
    }

    pub fn from_tuning(tuning: &PlayerTuning) -> Self {
        Self::new(
            tuning.max_health,
            ArmorTiers {
                vest: tuning.vest_shield,
                vest_and_helmet: tuning.vest_helmet_shield,
            },
        )
    }

    /// Покупка armor. Только первая покупка (любого tier'а) срабатывает.
    pub fn buy_armor(&mut self, tier: ArmorTier) -> bool {
        if self.shield.purchased {
            return false;
        }

        self.shield.purchased = true;
        self.shield.current = match tier {
            ArmorTier::Vest => self.tiers.vest,
            ArmorTier::VestAndHelmet => self.tiers.vest_and_helmet,
        };
        true
    }

    pub fn buy_vest(&mut self) -> bool {
        self.buy_armor(ArmorTier::Vest)
    }

    pub fn buy_vest_and_helmet(&mut self) -> bool {
        self.buy_armor(ArmorTier::VestAndHelmet)
    }

    /// Debug: полный shield в обход one-shot покупки
    pub fn grant_full_shield(&mut self) {
        self.shield.current = self.tiers.vest_and_helmet;
        self.shield.purchased = true;
    }

    /// Medkit: полное здоровье за один расходник
    ///
    /// No-op (false): мертв, пауза, health полный, medkit'ов нет.
    pub fn use_medkit(&mut self, inventory: &mut Inventory, paused: bool) -> bool {
        if self.dead || paused || self.health.is_full() {
            return false;
        }
        if !inventory.try_take_medkit() {
            return false;
        }

        self.health.restore_full();
        true
    }
}

impl Damageable for PlayerLedger {
    type Outcome = LedgerDamage;

    fn take_damage(&mut self, amount: f32) -> Option<LedgerDamage> {
        if self.dead {
            return None;
        }

        // Целые очки урона; NaN и отрицательные отсекаются здесь же
        let rounded = amount.round();
        if !(rounded > 0.0) {
            return None;
        }
        let damage = rounded as u32;

        let absorbed = self.shield.current.min(damage);
        self.shield.current -= absorbed;

        let health_lost = self.health.take_damage(damage - absorbed);

        let killed = !self.health.is_alive();
        if killed {
            self.dead = true;
        }

        Some(LedgerDamage {
            absorbed,
            health_lost,
            killed,
        })
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Event: купить armor
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ArmorPurchaseIntent {
    pub entity: Entity,
    pub tier: ArmorTier,
}

/// Event: debug-чит полного shield'а
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CheatShieldIntent {
    pub entity: Entity,
}

/// Event: использовать medkit
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct UseMedkitIntent {
    pub entity: Entity,
}
