//! Adversary controller
//!
//! Per-instance FSM (Idle / Chasing / Attacking / Dead) по дистанции до игрока,
//! отложенные удары с перепроверкой, hit-реакции, смерть и выпадение мозга.

use bevy::prelude::*;

use crate::CombatSet;

pub mod components;
pub mod spawn;
pub mod systems;

// Re-export основных типов
pub use components::{
    brain_impulse, choose_attack, select_behavior, AdversaryConfig, AdversaryHit, AdversaryState,
    AdversaryVitals, AttackState, AttackVariant, HeadshotOutcome,
};
pub use spawn::{adversary_bundle, spawn_adversary};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. apply_adversary_damage (фаза Damage, после ledger'а игрока)
/// 2. update_adversary_behavior: FSM + атаки
/// 3. integrate_adversary_movement: движение по MovementIntent
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AdversaryState>()
            .register_type::<AdversaryConfig>()
            .register_type::<AdversaryVitals>()
            .register_type::<AttackState>();

        app.add_systems(
            FixedUpdate,
            systems::apply_adversary_damage
                .in_set(CombatSet::Damage)
                .after(crate::combat::systems::apply_player_damage),
        )
        .add_systems(
            FixedUpdate,
            (
                systems::update_adversary_behavior,
                systems::integrate_adversary_movement,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(CombatSet::Behavior),
        );
    }
}
