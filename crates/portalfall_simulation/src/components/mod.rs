//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Health, Player, Adversary marker)
//! - combat: hit volumes, damage capability, blood spray
//! - movement: MovementIntent, AimRay
//! - equipment: инвентарь игрока и pickups

pub mod actor;
pub mod combat;
pub mod equipment;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use combat::*;
pub use equipment::*;
pub use movement::*;
