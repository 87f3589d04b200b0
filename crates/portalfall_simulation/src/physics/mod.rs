//! Physics queries
//!
//! Broad-phase движок живёт снаружи. Симуляции нужен только ray query для hitscan
//! оружия: аналитическое пересечение луча со сферами `HitVolumes`.

pub mod raycast;

// Re-export основных типов
pub use raycast::{cast_ray, damage_owner_chain, ray_sphere, RayHit};
