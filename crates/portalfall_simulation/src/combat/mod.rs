//! Combat system module
//!
//! ECS ответственность:
//! - Damageable контракт и маршрутизация `DamageRequest`
//! - Ledger игрока (health + armor shield, medkit)
//! - Hitscan оружие (rate limit, магазин, перезарядка, hit resolution)
//! - Очередь отложенных эффектов на combat clock
//! - Cue-события для внешних коллабораторов
//!
//! Урон по адверсариям и порталам применяют их модули (`ai`, `portal`),
//! в той же фазе `CombatSet::Damage`, строго после игрока.

use bevy::prelude::*;

use crate::CombatSet;

pub mod cues;
pub mod damage;
pub mod deferred;
pub mod ledger;
pub mod systems;
pub mod weapon;

#[cfg(test)]
mod ledger_tests;
#[cfg(test)]
mod weapon_tests;

// Re-export основных типов
pub use cues::{
    AdversaryKilled, AmmoChanged, AnimationCue, AnimationCueKind, EffectCue, EffectKind, GameOver,
    KillScore, LedgerChanged, PickupCollected, PickupSpawned,
};
pub use damage::{DamageRequest, Damageable, Dead, DespawnAfter, HitKind};
pub use deferred::{CombatClock, DeferredEffect, DeferredEffects};
pub use ledger::{
    ArmorPurchaseIntent, ArmorShield, ArmorTier, ArmorTiers, CheatShieldIntent, LedgerDamage,
    PlayerLedger, UseMedkitIntent,
};
pub use weapon::{
    Ammo, FireGate, FireIntent, Firearm, ReloadIntent, TriggerIntent, TriggerState, WeaponRecoil,
};

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (64Hz).
///
/// Порядок выполнения:
/// 1. Clock: advance_combat_clock
/// 2. Intents: armor → cheat → medkit → trigger → reload → fire
/// 3. Deferred: run_deferred_effects (удары адверсариев, cooldown, reload)
/// 4. Damage: apply_player_damage (потом адверсарии, потом порталы)
/// 5. Cleanup: despawn_after_timeout
///
/// Отдача затухает в Update по real time.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatClock>()
            .init_resource::<DeferredEffects>()
            .init_resource::<KillScore>();

        // Регистрация событий
        app.add_event::<DamageRequest>()
            .add_event::<FireIntent>()
            .add_event::<TriggerIntent>()
            .add_event::<ReloadIntent>()
            .add_event::<ArmorPurchaseIntent>()
            .add_event::<CheatShieldIntent>()
            .add_event::<UseMedkitIntent>()
            .add_event::<AnimationCue>()
            .add_event::<EffectCue>()
            .add_event::<GameOver>()
            .add_event::<AdversaryKilled>()
            .add_event::<LedgerChanged>()
            .add_event::<AmmoChanged>()
            .add_event::<PickupSpawned>()
            .add_event::<PickupCollected>();

        app.register_type::<PlayerLedger>()
            .register_type::<Firearm>()
            .register_type::<Ammo>()
            .register_type::<TriggerState>()
            .register_type::<WeaponRecoil>()
            .register_type::<Dead>()
            .register_type::<DespawnAfter>()
            .register_type::<CombatClock>()
            .register_type::<KillScore>();

        app.add_systems(
            FixedUpdate,
            systems::advance_combat_clock.in_set(CombatSet::Clock),
        )
        .add_systems(
            FixedUpdate,
            (
                systems::process_armor_purchases,
                systems::process_shield_cheats,
                systems::process_medkit_use,
                systems::process_trigger_intents,
                systems::process_reload_intents,
                systems::fire_weapons,
            )
                .chain()
                .in_set(CombatSet::Intents),
        )
        .add_systems(
            FixedUpdate,
            systems::run_deferred_effects.in_set(CombatSet::Deferred),
        )
        .add_systems(
            FixedUpdate,
            systems::apply_player_damage.in_set(CombatSet::Damage),
        )
        .add_systems(
            FixedUpdate,
            systems::despawn_after_timeout.in_set(CombatSet::Cleanup),
        )
        .add_systems(Update, systems::decay_weapon_recoil);
    }
}
