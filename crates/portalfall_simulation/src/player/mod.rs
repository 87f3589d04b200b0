//! Спавн игрока

use bevy::prelude::*;

use crate::combat::{Ammo, Firearm, PlayerLedger, TriggerState, WeaponRecoil};
use crate::components::{AimRay, DamageCapability, Inventory, Player};
use crate::config::CombatTuning;

/// Высота глаз (origin луча прицела по умолчанию)
pub const EYE_HEIGHT: f32 = 1.6;

/// Полный набор компонентов игрока: ledger, инвентарь, оружие, прицел
pub fn player_bundle(transform: Transform, tuning: &CombatTuning) -> impl Bundle {
    let aim = AimRay::new(
        transform.translation + Vec3::Y * EYE_HEIGHT,
        transform.forward().as_vec3(),
    );

    (
        Player,
        transform,
        PlayerLedger::from_tuning(&tuning.player),
        Inventory::with_medkits(tuning.player.starting_medkits),
        Firearm::from_tuning(&tuning.weapon),
        Ammo::from_tuning(&tuning.weapon),
        TriggerState::default(),
        WeaponRecoil::default(),
        aim,
        DamageCapability::Player,
    )
}

pub fn spawn_player(
    commands: &mut Commands,
    transform: Transform,
    tuning: &CombatTuning,
) -> Entity {
    commands.spawn(player_bundle(transform, tuning)).id()
}
