//! Общие helper'ы integration тестов
//!
//! Время headless App'а ручное: первый `update()` даёт 0 fixed tick'ов,
//! каждый следующий ровно один (1/64 s).

#![allow(dead_code)]

use bevy::prelude::*;
use portalfall_simulation::*;

/// Все события типа `E`, увиденные после фазы Cleanup
#[derive(Resource)]
pub struct Recorded<E: Event>(pub Vec<E>);

impl<E: Event> Default for Recorded<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<E: Event + Clone>(mut events: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(events.read().cloned());
}

/// Подписывает тест на события `E` (читаются в конце каждого tick'а)
pub fn record_events<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Recorded<E>>()
        .add_systems(FixedUpdate, record::<E>.after(CombatSet::Cleanup));
}

pub fn recorded<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Recorded<E>>().0.clone()
}

/// App с SimulationPlugin и заданным tuning'ом (часы ещё не прогреты)
pub fn create_combat_app_with(seed: u64, tuning: CombatTuning) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(tuning);
    app.add_plugins(SimulationPlugin);
    app
}

pub fn create_combat_app(seed: u64) -> App {
    create_combat_app_with(seed, CombatTuning::default())
}

/// Прогрев: первый update инициализирует часы
pub fn warm_up(app: &mut App) {
    app.update();
}

pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

pub fn send<E: Event>(app: &mut App, event: E) {
    app.world_mut().send_event(event);
}

pub fn spawn_player_at(app: &mut App, position: Vec3) -> Entity {
    let tuning = app.world().resource::<CombatTuning>().clone();
    app.world_mut()
        .spawn(player_bundle(Transform::from_translation(position), &tuning))
        .id()
}

pub fn spawn_adversary_at(app: &mut App, position: Vec3) -> Entity {
    let config = app.world().resource::<CombatTuning>().adversary.clone();
    app.world_mut()
        .spawn(ai::adversary_bundle(Transform::from_translation(position), &config))
        .id()
}

pub fn aim(app: &mut App, shooter: Entity, origin: Vec3, target: Vec3) {
    app.world_mut()
        .entity_mut(shooter)
        .insert(AimRay::looking_at(origin, target));
}

pub fn ledger(app: &App, player: Entity) -> PlayerLedger {
    app.world()
        .get::<PlayerLedger>(player)
        .cloned()
        .expect("player has a ledger")
}

pub fn count<C: Component>(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, With<C>>();
    query.iter(app.world()).count()
}
