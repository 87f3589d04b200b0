//! Portal spawn scheduler + objective уровня
//!
//! Каждый портал: Damageable спавнер адверсариев с ограниченным ростером.
//! Общий `LevelObjective` считает разрушенные порталы и открывает exit,
//! когда живых не осталось.

use bevy::prelude::*;

use crate::config::CombatTuning;
use crate::CombatSet;

pub mod components;
pub mod objective;
pub mod systems;

// Re-export основных типов
pub use components::{portal_bundle, PortalCore, PortalHit, PortalRoster};
pub use objective::{
    ExitActivated, ExitGate, LevelCompleted, LevelObjective, ObjectiveDisplay, ObjectiveUpdated,
};

/// Portal Plugin
///
/// Порядок выполнения:
/// 1. register_new_portals (фаза Input, работает и на паузе)
/// 2. apply_portal_damage (фаза Damage, после адверсариев)
/// 3. tick_portal_spawners (фаза Spawning)
pub struct PortalPlugin;

impl Plugin for PortalPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<LevelObjective>() {
            let format = app
                .world()
                .get_resource::<CombatTuning>()
                .map(|tuning| tuning.portal.objective_format.clone())
                .unwrap_or_else(|| CombatTuning::default().portal.objective_format);
            app.insert_resource(LevelObjective::with_format(&format));
        }

        app.add_event::<ObjectiveUpdated>()
            .add_event::<ExitActivated>()
            .add_event::<LevelCompleted>();

        app.register_type::<PortalCore>()
            .register_type::<PortalRoster>()
            .register_type::<ExitGate>()
            .register_type::<LevelObjective>();

        app.add_systems(
            FixedUpdate,
            systems::register_new_portals.in_set(CombatSet::Input),
        )
        .add_systems(
            FixedUpdate,
            systems::apply_portal_damage
                .in_set(CombatSet::Damage)
                .after(crate::ai::systems::apply_adversary_damage),
        )
        .add_systems(
            FixedUpdate,
            systems::tick_portal_spawners.in_set(CombatSet::Spawning),
        );
    }
}
