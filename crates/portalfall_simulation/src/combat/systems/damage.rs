//! Уборка мёртвых entity

use bevy::prelude::*;

use crate::combat::{CombatClock, DespawnAfter};

/// Система: деспавн entities с истёкшим DespawnAfter timeout
///
/// Время: combat clock, поэтому трупы и разрушенные порталы не исчезают на паузе.
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    clock: Res<CombatClock>,
) {
    let current_time = clock.now();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).try_despawn();
        }
    }
}
