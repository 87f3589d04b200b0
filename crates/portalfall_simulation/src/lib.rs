//! Portalfall Simulation Core
//!
//! Headless ECS-симуляция боя на Bevy 0.16:
//! - игрок: health/shield ledger, hitscan оружие, расходники
//! - адверсарии: FSM (Idle/Chasing/Attacking/Dead) + отложенные удары
//! - порталы: адаптивный спавнер + общий objective уровня
//! - глобальная пауза
//!
//! Рендер, звук, анимации и UI живут снаружи, симуляция только шлёт cue-события
//! (`AnimationCue`, `EffectCue`, `ObjectiveUpdated`, ...).

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod input;
pub mod logger;
pub mod pause;
pub mod physics;
pub mod player;
pub mod portal;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AdversaryConfig, AdversaryState, AdversaryVitals};
pub use combat::{
    Ammo, CombatClock, CombatPlugin, DamageRequest, Damageable, Dead, DeferredEffects, Firearm,
    KillScore, PlayerLedger,
};
pub use components::*;
pub use config::{CombatTuning, ConfigError};
pub use input::{InputAction, InputPhase, InputPlugin, PlayerInput};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use pause::{combat_running, PausePlugin, PauseState};
pub use player::{player_bundle, spawn_player};
pub use portal::{ExitGate, LevelObjective, PortalCore, PortalPlugin};

/// Шаг FixedUpdate (64Hz, точно представим в f32)
pub const FIXED_TIMESTEP_SECS: f64 = 1.0 / 64.0;

/// Порядок фаз одного simulation tick'а (строгая цепочка)
///
/// События, записанные в ранней фазе, читаются поздними фазами в том же tick'е:
/// смертельный урон из `Damage` уже виден в `Behavior` и `Spawning`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Продвижение `CombatClock`
    Clock,
    /// Input → intents, toggle паузы
    Input,
    /// Обработка intents (оружие, ledger, interact)
    Intents,
    /// Срабатывание отложенных эффектов
    Deferred,
    /// Применение `DamageRequest`
    Damage,
    /// AI адверсариев
    Behavior,
    /// Порталы
    Spawning,
    /// Деспавн, счётчики
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed и tuning могли быть вставлены до plugin'а (тесты, headless app)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        if !app.world().contains_resource::<CombatTuning>() {
            app.insert_resource(CombatTuning::default());
        }

        app.insert_resource(Time::<Fixed>::from_hz(64.0))
            .register_type::<CombatTuning>()
            .register_type::<Player>()
            .register_type::<Adversary>()
            .register_type::<Health>()
            .register_type::<DamageCapability>()
            .register_type::<HitVolumes>()
            .register_type::<ColliderOwner>()
            .register_type::<BloodSpray>()
            .register_type::<MovementIntent>()
            .register_type::<AimRay>()
            .register_type::<Inventory>()
            .register_type::<Pickup>()
            .register_type::<PickupImpulse>()
            .configure_sets(
                FixedUpdate,
                (
                    CombatSet::Clock,
                    CombatSet::Input,
                    CombatSet::Intents,
                    CombatSet::Deferred,
                    CombatSet::Damage,
                    CombatSet::Behavior,
                    CombatSet::Spawning,
                    CombatSet::Cleanup,
                )
                    .chain(),
            )
            // Всё, что продвигается временем, замирает на паузе
            .configure_sets(FixedUpdate, CombatSet::Clock.run_if(combat_running))
            .configure_sets(FixedUpdate, CombatSet::Deferred.run_if(combat_running))
            .configure_sets(FixedUpdate, CombatSet::Behavior.run_if(combat_running))
            .configure_sets(FixedUpdate, CombatSet::Spawning.run_if(combat_running))
            .configure_sets(FixedUpdate, CombatSet::Cleanup.run_if(combat_running))
            .add_plugins((PausePlugin, InputPlugin, CombatPlugin, AIPlugin, PortalPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время продвигается вручную на один fixed шаг за `app.update()`: первый update
/// инициализирует часы (0 fixed tick'ов), каждый следующий даёт ровно один tick.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            FIXED_TIMESTEP_SECS,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(64.0));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
