//! Базовые компоненты акторов: Health, Player, Adversary

use bevy::prelude::*;

/// Игрок (единственный, цель адверсариев)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Адверсарий (спавнится порталами)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Adversary;

/// Здоровье (целочисленное, игрок и адверсарии)
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Возвращает реально снятое количество
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    pub fn deplete(&mut self) {
        self.current = 0;
    }
}
