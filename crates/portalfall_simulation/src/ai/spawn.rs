//! Спавн адверсариев

use bevy::prelude::*;

use crate::ai::{AdversaryConfig, AdversaryState, AdversaryVitals, AttackState};
use crate::components::{Adversary, BloodSpray, DamageCapability, HitVolumes, MovementIntent};

/// Полный набор компонентов адверсария
pub fn adversary_bundle(transform: Transform, config: &AdversaryConfig) -> impl Bundle {
    (
        Adversary,
        transform,
        AdversaryState::Idle,
        config.clone(),
        AdversaryVitals::from_config(config),
        AttackState::default(),
        MovementIntent::default(),
        DamageCapability::Adversary,
        HitVolumes::humanoid(),
        BloodSpray,
    )
}

pub fn spawn_adversary(
    commands: &mut Commands,
    transform: Transform,
    config: &AdversaryConfig,
) -> Entity {
    commands.spawn(adversary_bundle(transform, config)).id()
}
