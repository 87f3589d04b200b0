//! Интеграция движения адверсариев (без навигации)

use bevy::prelude::*;

use crate::ai::{AdversaryConfig, AdversaryVitals};
use crate::combat::Damageable;
use crate::components::{Adversary, MovementIntent};

/// Система: position += direction * walk_speed * dt
///
/// Хост с navmesh может убрать эту систему и читать `MovementIntent` сам.
pub fn integrate_adversary_movement(
    time: Res<Time>,
    mut adversaries: Query<
        (&mut Transform, &MovementIntent, &AdversaryConfig, &AdversaryVitals),
        With<Adversary>,
    >,
) {
    let delta = time.delta_secs();

    for (mut transform, intent, config, vitals) in adversaries.iter_mut() {
        if vitals.is_dead() || !intent.is_moving() {
            continue;
        }
        transform.translation += intent.direction * config.walk_speed * delta;
    }
}
