//! Movement компоненты: намерение движения и луч прицела

use bevy::prelude::*;

/// Желаемое направление движения (горизонтальное, нормализованное или ноль)
///
/// AI пишет каждый tick. Хост с навигацией может читать его вместо
/// встроенной интеграции позиции.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct MovementIntent {
    pub direction: Vec3,
}

impl MovementIntent {
    pub fn stop(&mut self) {
        self.direction = Vec3::ZERO;
    }

    pub fn is_moving(&self) -> bool {
        self.direction != Vec3::ZERO
    }
}

/// Луч из центра обзора (камера игрока), обновляется хостом
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AimRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Default for AimRay {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}

impl AimRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Прицел из точки на цель
    pub fn looking_at(origin: Vec3, target: Vec3) -> Self {
        Self {
            origin,
            direction: (target - origin).normalize_or_zero(),
        }
    }
}
