//! Combat компоненты: кого можно бить и во что попадает луч

use bevy::prelude::*;

/// Capability tag: entity принимает урон
///
/// Вешается при спавне. `DamageRequest` маршрутизируется по этому тегу,
/// оружие ищет его на попавшем collider'е и вверх по цепочке `ColliderOwner`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum DamageCapability {
    Player,
    Adversary,
    Portal,
}

/// Тип поверхности hit volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum HitSurface {
    #[default]
    Body,
    /// Голова адверсария → headshot
    Head,
}

/// Сфера попадания (offset в локальных координатах entity)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct HitSphere {
    pub offset: Vec3,
    pub radius: f32,
    pub surface: HitSurface,
}

impl HitSphere {
    pub fn body(offset: Vec3, radius: f32) -> Self {
        Self {
            offset,
            radius,
            surface: HitSurface::Body,
        }
    }

    pub fn head(offset: Vec3, radius: f32) -> Self {
        Self {
            offset,
            radius,
            surface: HitSurface::Head,
        }
    }
}

/// Набор hit volumes entity (то, во что попадает луч оружия)
///
/// Удаление компонента = collision disabled.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct HitVolumes(pub Vec<HitSphere>);

impl HitVolumes {
    /// Стандартный гуманоид: тело + голова
    pub fn humanoid() -> Self {
        Self(vec![
            HitSphere::body(Vec3::new(0.0, 0.9, 0.0), 0.45),
            HitSphere::head(Vec3::new(0.0, 1.65, 0.0), 0.2),
        ])
    }

    pub fn single(radius: f32) -> Self {
        Self(vec![HitSphere::body(Vec3::ZERO, radius)])
    }
}

/// Collider: часть агрегата (урон уходит владельцу)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ColliderOwner(pub Entity);

/// Entity поддерживает blood spray cue при попадании
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct BloodSpray;
