//! Ledger игрока: урон, armor, чит, medkit

use bevy::prelude::*;

use crate::combat::{
    AnimationCue, AnimationCueKind, ArmorPurchaseIntent, CheatShieldIntent, DamageRequest,
    Damageable, Dead, GameOver, LedgerChanged, PlayerLedger, UseMedkitIntent,
};
use crate::components::{DamageCapability, Inventory};
use crate::logger::{log, log_info};
use crate::pause::PauseState;

fn ledger_changed(entity: Entity, ledger: &PlayerLedger) -> LedgerChanged {
    LedgerChanged {
        entity,
        health: ledger.health.current,
        max_health: ledger.health.max,
        shield: ledger.shield.current,
    }
}

/// Система: `DamageRequest` → ledger игрока
///
/// Смерть: `Dead` marker, death animation cue, `GameOver` (ровно один раз,
/// мёртвый ledger дальше возвращает no-op).
pub fn apply_player_damage(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    mut ledgers: Query<(&mut PlayerLedger, &DamageCapability)>,
    mut animation_cues: EventWriter<AnimationCue>,
    mut ledger_events: EventWriter<LedgerChanged>,
    mut game_over: EventWriter<GameOver>,
) {
    for request in requests.read() {
        let Ok((mut ledger, capability)) = ledgers.get_mut(request.target) else {
            continue;
        };
        if *capability != DamageCapability::Player {
            continue;
        }

        let Some(outcome) = ledger.take_damage(request.amount) else {
            log(&format!(
                "Player {:?}: damage {} ignored (dead or non-positive)",
                request.target, request.amount
            ));
            continue;
        };

        log(&format!(
            "Player {:?}: -{} shield, -{} hp → hp {}/{}, shield {}",
            request.target,
            outcome.absorbed,
            outcome.health_lost,
            ledger.health.current,
            ledger.health.max,
            ledger.shield.current
        ));

        animation_cues.write(AnimationCue {
            entity: request.target,
            kind: AnimationCueKind::PlayerHurt,
        });
        ledger_events.write(ledger_changed(request.target, &ledger));

        if outcome.killed {
            log_info(&format!("Player {:?} died", request.target));
            commands.entity(request.target).try_insert(Dead);
            animation_cues.write(AnimationCue {
                entity: request.target,
                kind: AnimationCueKind::PlayerDeath,
            });
            game_over.write(GameOver {
                player: request.target,
            });
        }
    }
}

/// Система: покупка armor (один раз за жизнь)
pub fn process_armor_purchases(
    mut intents: EventReader<ArmorPurchaseIntent>,
    mut ledgers: Query<&mut PlayerLedger>,
    mut ledger_events: EventWriter<LedgerChanged>,
) {
    for intent in intents.read() {
        let Ok(mut ledger) = ledgers.get_mut(intent.entity) else {
            continue;
        };

        if ledger.buy_armor(intent.tier) {
            log_info(&format!(
                "Player {:?}: bought {:?}, shield {}",
                intent.entity, intent.tier, ledger.shield.current
            ));
            ledger_events.write(ledger_changed(intent.entity, &ledger));
        } else {
            log(&format!(
                "Player {:?}: armor already purchased, {:?} ignored",
                intent.entity, intent.tier
            ));
        }
    }
}

/// Система: debug-чит полного shield'а
pub fn process_shield_cheats(
    mut intents: EventReader<CheatShieldIntent>,
    mut ledgers: Query<&mut PlayerLedger>,
    mut ledger_events: EventWriter<LedgerChanged>,
) {
    for intent in intents.read() {
        let Ok(mut ledger) = ledgers.get_mut(intent.entity) else {
            continue;
        };

        ledger.grant_full_shield();
        log_info(&format!("Player {:?}: shield cheat", intent.entity));
        ledger_events.write(ledger_changed(intent.entity, &ledger));
    }
}

/// Система: medkit → полное здоровье
pub fn process_medkit_use(
    mut intents: EventReader<UseMedkitIntent>,
    pause: Res<PauseState>,
    mut players: Query<(&mut PlayerLedger, &mut Inventory)>,
    mut ledger_events: EventWriter<LedgerChanged>,
) {
    for intent in intents.read() {
        let Ok((mut ledger, mut inventory)) = players.get_mut(intent.entity) else {
            continue;
        };

        if ledger.use_medkit(&mut inventory, pause.paused) {
            log_info(&format!(
                "Player {:?}: medkit used ({} left)",
                intent.entity, inventory.medkits
            ));
            ledger_events.write(ledger_changed(intent.entity, &ledger));
        } else {
            log(&format!(
                "Player {:?}: medkit ignored (dead, paused, full health or none left)",
                intent.entity
            ));
        }
    }
}
