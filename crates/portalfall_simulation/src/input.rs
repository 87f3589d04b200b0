//! Input routing: дискретные сигналы → intents игрока
//!
//! Маппинг устройств (клавиатура, геймпад) делает хост. Сюда приходят уже
//! абстрактные `PlayerInput { action, phase }`.

use bevy::prelude::*;

use crate::combat::{
    Ammo, AmmoChanged, CheatShieldIntent, Damageable, FireIntent, PickupCollected, PlayerLedger,
    ReloadIntent, TriggerIntent, UseMedkitIntent,
};
use crate::components::{Inventory, Pickup, PickupKind, Player};
use crate::config::CombatTuning;
use crate::logger::{log, log_info};
use crate::pause::{PauseState, TogglePauseIntent};
use crate::portal::{ExitGate, LevelCompleted};
use crate::CombatSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Fire,
    Reload,
    UseMedkit,
    Interact,
    CheatShield,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputPhase {
    Pressed,
    Released,
}

/// Event: сигнал от хоста
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerInput {
    pub action: InputAction,
    pub phase: InputPhase,
}

impl PlayerInput {
    pub fn pressed(action: InputAction) -> Self {
        Self {
            action,
            phase: InputPhase::Pressed,
        }
    }

    pub fn released(action: InputAction) -> Self {
        Self {
            action,
            phase: InputPhase::Released,
        }
    }
}

/// Event: подобрать / войти рядом
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct InteractIntent {
    pub entity: Entity,
}

/// Система: `PlayerInput` → intents единственного игрока
///
/// Пауза переключается и без игрока.
pub fn route_player_input(
    mut inputs: EventReader<PlayerInput>,
    players: Query<Entity, With<Player>>,
    mut fire: EventWriter<FireIntent>,
    mut trigger: EventWriter<TriggerIntent>,
    mut reload: EventWriter<ReloadIntent>,
    mut medkit: EventWriter<UseMedkitIntent>,
    mut interact: EventWriter<InteractIntent>,
    mut cheat: EventWriter<CheatShieldIntent>,
    mut pause: EventWriter<TogglePauseIntent>,
) {
    let player = players.single().ok();

    for input in inputs.read() {
        if input.action == InputAction::Pause {
            if input.phase == InputPhase::Pressed {
                pause.write(TogglePauseIntent);
            }
            continue;
        }

        let Some(player) = player else {
            log(&format!("Input {:?} dropped: no player", input.action));
            continue;
        };

        match (input.action, input.phase) {
            (InputAction::Fire, InputPhase::Pressed) => {
                fire.write(FireIntent { shooter: player });
                trigger.write(TriggerIntent {
                    shooter: player,
                    held: true,
                });
            }
            (InputAction::Fire, InputPhase::Released) => {
                trigger.write(TriggerIntent {
                    shooter: player,
                    held: false,
                });
            }
            (InputAction::Reload, InputPhase::Pressed) => {
                reload.write(ReloadIntent { shooter: player });
            }
            (InputAction::UseMedkit, InputPhase::Pressed) => {
                medkit.write(UseMedkitIntent { entity: player });
            }
            (InputAction::Interact, InputPhase::Pressed) => {
                interact.write(InteractIntent { entity: player });
            }
            (InputAction::CheatShield, InputPhase::Pressed) => {
                cheat.write(CheatShieldIntent { entity: player });
            }
            _ => {}
        }
    }
}

/// Система: Interact
///
/// Ближайший pickup в радиусе interact_distance уходит в инвентарь
/// (патроны в резерв оружия). Если рядом ничего нет, вход в активный exit.
/// На паузе и у мёртвого игрока: no-op.
pub fn process_interactions(
    mut commands: Commands,
    mut intents: EventReader<InteractIntent>,
    pause: Res<PauseState>,
    tuning: Res<CombatTuning>,
    mut players: Query<(&Transform, &mut Inventory, Option<&mut Ammo>, Option<&PlayerLedger>)>,
    pickups: Query<(Entity, &Transform, &Pickup)>,
    exits: Query<(&Transform, &ExitGate)>,
    mut collected_events: EventWriter<PickupCollected>,
    mut ammo_events: EventWriter<AmmoChanged>,
    mut level_completed: EventWriter<LevelCompleted>,
) {
    let mut taken: Vec<Entity> = Vec::new();

    for intent in intents.read() {
        if pause.paused {
            continue;
        }

        let Ok((transform, mut inventory, ammo, ledger)) = players.get_mut(intent.entity) else {
            continue;
        };
        if ledger.is_some_and(|ledger| ledger.is_dead()) {
            continue;
        }

        let position = transform.translation;
        let nearest = pickups
            .iter()
            .filter(|(entity, _, _)| !taken.contains(entity))
            .map(|(entity, pickup_transform, pickup)| {
                (entity, pickup_transform.translation.distance(position), *pickup)
            })
            .filter(|(_, distance, _)| *distance <= tuning.player.interact_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((entity, _, pickup)) = nearest {
            match pickup.kind {
                PickupKind::Brain => inventory.brains += pickup.amount,
                PickupKind::Medkit => inventory.medkits += pickup.amount,
                PickupKind::Kevlar => inventory.kevlar += pickup.amount,
                PickupKind::Ammo => {
                    if let Some(mut ammo) = ammo {
                        ammo.add_reserve(pickup.amount);
                        ammo_events.write(AmmoChanged {
                            entity: intent.entity,
                            magazine: ammo.magazine,
                            reserve: ammo.reserve,
                        });
                    }
                }
            }

            taken.push(entity);
            commands.entity(entity).try_despawn();
            log(&format!(
                "{:?} picked up {:?} x{}",
                intent.entity, pickup.kind, pickup.amount
            ));
            collected_events.write(PickupCollected {
                collector: intent.entity,
                kind: pickup.kind,
                amount: pickup.amount,
            });
            continue;
        }

        let exit = exits
            .iter()
            .filter(|(_, gate)| gate.active)
            .find(|(exit_transform, _)| {
                let distance = exit_transform.translation.distance(position);
                distance <= tuning.player.exit_interact_distance
            });

        if let Some((_, gate)) = exit {
            log_info(&format!("Level completed → {:?}", gate.destination));
            level_completed.write(LevelCompleted {
                destination: gate.destination.clone(),
            });
        }
    }
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInput>()
            .add_event::<InteractIntent>()
            .add_systems(
                FixedUpdate,
                route_player_input.in_set(CombatSet::Input),
            )
            .add_systems(
                FixedUpdate,
                process_interactions
                    .in_set(CombatSet::Intents)
                    .after(crate::combat::systems::fire_weapons),
            );
    }
}
