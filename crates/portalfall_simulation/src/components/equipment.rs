//! Инвентарь игрока и подбираемые предметы

use bevy::prelude::*;

/// Расходники игрока (патроны живут в `Ammo` оружия)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub struct Inventory {
    pub brains: u32,
    pub medkits: u32,
    pub kevlar: u32,
}

impl Inventory {
    pub fn with_medkits(medkits: u32) -> Self {
        Self {
            medkits,
            ..default()
        }
    }

    /// Списывает один medkit (false если пусто)
    pub fn try_take_medkit(&mut self) -> bool {
        if self.medkits == 0 {
            return false;
        }
        self.medkits -= 1;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PickupKind {
    Brain,
    Ammo,
    Medkit,
    Kevlar,
}

/// Предмет на земле (подбирается через Interact)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Pickup {
    pub kind: PickupKind,
    pub amount: u32,
}

impl Pickup {
    pub fn new(kind: PickupKind, amount: u32) -> Self {
        Self { kind, amount }
    }
}

/// Импульс при появлении pickup'а (применяет внешняя физика)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PickupImpulse(pub Vec3);
