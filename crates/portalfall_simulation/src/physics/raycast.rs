//! Ray query над `HitVolumes`

use bevy::prelude::*;

use crate::components::{ColliderOwner, HitSurface, HitVolumes};

/// Глубина цепочки `ColliderOwner` (защита от циклов)
const MAX_OWNER_DEPTH: usize = 8;

/// Результат ray query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub surface: HitSurface,
    pub point: Vec3,
    /// Нормаль поверхности в точке попадания
    pub normal: Vec3,
    pub distance: f32,
}

/// Пересечение луча со сферой.
/// Returns distance вдоль луча до первой точки входа (или None).
///
/// `direction` должен быть нормализован. Если origin внутри сферы: 0.
pub fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = origin - center;
    let b = to_origin.dot(direction);
    let c = to_origin.length_squared() - radius * radius;

    if c <= 0.0 {
        return Some(0.0);
    }

    // Сфера позади или луч мимо
    if b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some(-b - discriminant.sqrt())
}

/// Ближайшее попадание луча в hit volumes в пределах `max_distance`
///
/// `exclude`: стрелок (луч не цепляет собственные volumes).
/// При равной дистанции побеждает volume, встреченный первым.
pub fn cast_ray<'a>(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    exclude: Option<Entity>,
    volumes: impl IntoIterator<Item = (Entity, &'a Transform, &'a HitVolumes)>,
) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO || max_distance <= 0.0 {
        return None;
    }

    let mut closest: Option<RayHit> = None;

    for (entity, transform, hit_volumes) in volumes {
        if Some(entity) == exclude {
            continue;
        }

        for sphere in &hit_volumes.0 {
            let center = transform.translation + transform.rotation * sphere.offset;
            let Some(distance) = ray_sphere(origin, dir, center, sphere.radius) else {
                continue;
            };

            if distance > max_distance {
                continue;
            }
            if closest.is_some_and(|hit| distance >= hit.distance) {
                continue;
            }

            let point = origin + dir * distance;
            closest = Some(RayHit {
                entity,
                surface: sphere.surface,
                point,
                normal: (point - center).normalize_or(-dir),
                distance,
            });
        }
    }

    closest
}

/// Цепочка [entity, owner, owner's owner, ...] для поиска Damageable агрегата
pub fn damage_owner_chain(entity: Entity, owners: &Query<&ColliderOwner>) -> Vec<Entity> {
    let mut chain = vec![entity];
    let mut current = entity;

    while chain.len() < MAX_OWNER_DEPTH {
        let Ok(owner) = owners.get(current) else {
            break;
        };
        if chain.contains(&owner.0) {
            break;
        }
        chain.push(owner.0);
        current = owner.0;
    }

    chain
}
