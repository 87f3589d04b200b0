//! Portal integration test
//!
//! Порталы в полном App:
//! - регистрация, первый адверсарий, адаптивный таймер и cap ростера
//! - пауза замораживает спавн
//! - разрушение → objective → exit → LevelCompleted

mod common;

use bevy::prelude::*;
use common::*;
use portalfall_simulation::combat::{EffectCue, EffectKind};
use portalfall_simulation::portal::{
    portal_bundle, ExitActivated, LevelCompleted, ObjectiveUpdated, PortalRoster,
};
use portalfall_simulation::*;

fn spawn_portal(app: &mut App, position: Vec3, spawn_offset: Vec3) -> Entity {
    let tuning = app.world().resource::<CombatTuning>().portal.clone();
    let core = PortalCore::from_tuning(&tuning).with_spawn_offset(spawn_offset);
    app.world_mut()
        .spawn(portal_bundle(Transform::from_translation(position), core))
        .id()
}

fn roster_len(app: &App, portal: Entity) -> usize {
    app.world()
        .get::<PortalRoster>(portal)
        .map(|roster| roster.0.len())
        .unwrap_or(0)
}

fn fast_spawner_tuning() -> CombatTuning {
    let mut tuning = CombatTuning::default();
    tuning.portal.base_spawn_interval = 1.0;
    tuning.portal.min_spawn_interval = 0.5;
    tuning.portal.max_alive_adversaries = 2;
    tuning
}

/// Test: первый адверсарий сразу, следующий через base interval, дальше cap
#[test]
fn test_portal_spawns_until_roster_cap() {
    let mut app = create_combat_app_with(42, fast_spawner_tuning());
    let portal = spawn_portal(&mut app, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
    warm_up(&mut app);

    run_ticks(&mut app, 1);
    assert_eq!(roster_len(&app, portal), 1);
    assert_eq!(count::<Adversary>(&mut app), 1);
    assert_eq!(app.world().resource::<LevelObjective>().total(), 1);

    // 1s = 64 tick'а
    run_ticks(&mut app, 70);
    assert_eq!(roster_len(&app, portal), 2);

    // Cap: таймер стоит
    run_ticks(&mut app, 300);
    assert_eq!(roster_len(&app, portal), 2);
    assert_eq!(count::<Adversary>(&mut app), 2);

    // Убитый адверсарий освобождает место в ростере
    let victim = app.world().get::<PortalRoster>(portal).unwrap().0[0];
    send(&mut app, DamageRequest::body(victim, 1000.0, None));
    run_ticks(&mut app, 1);
    assert_eq!(roster_len(&app, portal), 1);

    run_ticks(&mut app, 70);
    assert_eq!(roster_len(&app, portal), 2);
    // Труп ещё не удалён (destroy_delay), живых двое
    assert_eq!(count::<Adversary>(&mut app), 3);
}

/// Test: урон по порталу ускоряет спавн
#[test]
fn test_damage_shortens_countdown() {
    let mut app = create_combat_app(42);
    let portal = spawn_portal(&mut app, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
    warm_up(&mut app);
    run_ticks(&mut app, 1);

    let before = app.world().get::<PortalCore>(portal).unwrap().countdown;
    assert!(before > 5.0);

    // 200/400 hp → интервал lerp(1.5, 6, 0.5) = 3.75, countdown ≤ половины
    send(&mut app, DamageRequest::body(portal, 200.0, None));
    run_ticks(&mut app, 1);

    let core = app.world().get::<PortalCore>(portal).unwrap().clone();
    assert_eq!(core.integrity, 200.0);
    assert!((core.spawn_interval() - 3.75).abs() < 1e-4);
    assert!(core.countdown <= 3.75 * 0.5);
}

/// Test: пауза замораживает таймер спавна
#[test]
fn test_pause_freezes_spawning() {
    let mut app = create_combat_app_with(42, fast_spawner_tuning());
    let portal = spawn_portal(&mut app, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
    warm_up(&mut app);

    run_ticks(&mut app, 1);
    send(&mut app, PlayerInput::pressed(InputAction::Pause));
    run_ticks(&mut app, 1);
    let frozen = app.world().get::<PortalCore>(portal).unwrap().countdown;

    run_ticks(&mut app, 200);
    assert_eq!(app.world().get::<PortalCore>(portal).unwrap().countdown, frozen);
    assert_eq!(roster_len(&app, portal), 1);

    send(&mut app, PlayerInput::pressed(InputAction::Pause));
    run_ticks(&mut app, 70);
    assert_eq!(roster_len(&app, portal), 2);
}

/// Test: полный цикл уровня
///
/// Два портала. Первый разрушен запросом урона, второй отстрелян игроком.
/// Exit активируется только после последнего, interact у exit завершает уровень.
#[test]
fn test_destroying_all_portals_opens_exit() {
    let mut tuning = CombatTuning::default();
    tuning.portal.max_health = 50.0;
    let mut app = create_combat_app_with(42, tuning);
    record_events::<ObjectiveUpdated>(&mut app);
    record_events::<ExitActivated>(&mut app);
    record_events::<LevelCompleted>(&mut app);
    record_events::<EffectCue>(&mut app);

    let player = spawn_player_at(&mut app, Vec3::ZERO);
    // Адверсарии выходят далеко за порталом, вне sight_range игрока
    let far_portal = spawn_portal(
        &mut app,
        Vec3::new(30.0, 1.0, 0.0),
        Vec3::new(20.0, 0.0, 0.0),
    );
    let near_portal = spawn_portal(
        &mut app,
        Vec3::new(0.0, 1.0, -10.0),
        Vec3::new(0.0, 0.0, -20.0),
    );
    let exit = app
        .world_mut()
        .spawn((Transform::from_xyz(1.0, 0.0, 0.0), ExitGate::to("next_level")))
        .id();
    aim(
        &mut app,
        player,
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, -10.0),
    );
    warm_up(&mut app);

    run_ticks(&mut app, 1);
    let objective = app.world().resource::<LevelObjective>();
    assert_eq!((objective.destroyed, objective.total()), (0, 2));
    assert_eq!(objective.display().text, "Defeat portals 0/2");

    send(&mut app, DamageRequest::body(far_portal, 1000.0, None));
    run_ticks(&mut app, 1);
    {
        let objective = app.world().resource::<LevelObjective>();
        assert_eq!((objective.destroyed, objective.total()), (1, 2));
        assert!(!objective.exit_activated());
    }
    assert!(!app.world().get::<ExitGate>(exit).unwrap().active);

    // До активации exit interact ничего не завершает
    send(&mut app, PlayerInput::pressed(InputAction::Interact));
    run_ticks(&mut app, 1);
    assert!(recorded::<LevelCompleted>(&app).is_empty());

    // 2 попадания по 25 = 50 hp
    send(&mut app, PlayerInput::pressed(InputAction::Fire));
    run_ticks(&mut app, 12);
    send(&mut app, PlayerInput::released(InputAction::Fire));
    run_ticks(&mut app, 1);

    assert!(app
        .world()
        .get::<PortalCore>(near_portal)
        .unwrap()
        .is_destroyed());
    assert!(app.world().get::<Dead>(near_portal).is_some());
    assert!(app.world().get::<HitVolumes>(near_portal).is_none());

    let objective = app.world().resource::<LevelObjective>();
    assert!(objective.exit_activated());
    let display = objective.display();
    assert_eq!(display.text, "Defeat portals 2/2");
    assert!(display.completed);

    assert!(app.world().get::<ExitGate>(exit).unwrap().active);
    assert_eq!(recorded::<ExitActivated>(&app), vec![ExitActivated { exit }]);

    let updates = recorded::<ObjectiveUpdated>(&app);
    let progress: Vec<(u32, u32, bool)> = updates
        .iter()
        .map(|update| (update.destroyed, update.total, update.completed))
        .collect();
    assert_eq!(progress, vec![(0, 2, false), (1, 2, false), (2, 2, true)]);

    let effects = recorded::<EffectCue>(&app);
    assert_eq!(
        effects
            .iter()
            .filter(|cue| cue.kind == EffectKind::PortalDestroyed)
            .count(),
        2
    );
    assert!(effects.iter().any(|cue| cue.kind == EffectKind::PortalHit));

    send(&mut app, PlayerInput::pressed(InputAction::Interact));
    run_ticks(&mut app, 1);
    assert_eq!(
        recorded::<LevelCompleted>(&app),
        vec![LevelCompleted {
            destination: Some("next_level".to_string())
        }]
    );

    // Разрушенный портал удаляется через removal_delay (2s)
    run_ticks(&mut app, 140);
    assert!(app.world().get_entity(near_portal).is_err());
    assert!(app.world().get_entity(far_portal).is_err());
}

fn spawn_exit(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((Transform::from_xyz(1.0, 0.0, 0.0), ExitGate::to("next_level")))
        .id()
}

/// Test: портал, разрушенный в первый же tick, не открывает exit при живом втором
#[test]
fn test_first_tick_destruction_keeps_exit_closed() {
    let mut app = create_combat_app(42);
    record_events::<ExitActivated>(&mut app);
    let first = spawn_portal(&mut app, Vec3::new(-5.0, 1.0, -10.0), Vec3::ZERO);
    let second = spawn_portal(&mut app, Vec3::new(5.0, 1.0, -10.0), Vec3::ZERO);
    let exit = spawn_exit(&mut app);
    warm_up(&mut app);

    send(&mut app, DamageRequest::body(first, 400.0, None));
    run_ticks(&mut app, 1);

    let objective = app.world().resource::<LevelObjective>();
    assert_eq!((objective.active, objective.destroyed), (1, 1));
    assert!(!objective.exit_activated());
    assert_eq!(objective.display().text, "Defeat portals 1/2");
    assert!(!app.world().get::<PortalCore>(second).unwrap().is_destroyed());
    assert!(!app.world().get::<ExitGate>(exit).unwrap().active);
    assert!(recorded::<ExitActivated>(&app).is_empty());

    send(&mut app, DamageRequest::body(second, 400.0, None));
    run_ticks(&mut app, 1);
    assert!(app.world().resource::<LevelObjective>().exit_activated());
    assert_eq!(recorded::<ExitActivated>(&app), vec![ExitActivated { exit }]);
}

/// Test: уровень стартует на паузе, портал учтён до первого урона
#[test]
fn test_portals_registered_while_paused() {
    let mut app = create_combat_app(42);
    let first = spawn_portal(&mut app, Vec3::new(-5.0, 1.0, -10.0), Vec3::ZERO);
    let second = spawn_portal(&mut app, Vec3::new(5.0, 1.0, -10.0), Vec3::ZERO);
    let exit = spawn_exit(&mut app);
    warm_up(&mut app);

    send(&mut app, PlayerInput::pressed(InputAction::Pause));
    send(&mut app, DamageRequest::body(first, 400.0, None));
    run_ticks(&mut app, 1);

    assert!(app.world().resource::<PauseState>().paused);
    let objective = app.world().resource::<LevelObjective>();
    assert_eq!(objective.total(), 2);
    assert!(!objective.exit_activated());
    assert!(!app.world().get::<ExitGate>(exit).unwrap().active);

    // Spawning стоит на паузе: первые адверсарии ещё не вышли
    assert_eq!(count::<Adversary>(&mut app), 0);
    assert!(!app.world().get::<PortalCore>(second).unwrap().is_open());

    send(&mut app, PlayerInput::pressed(InputAction::Pause));
    run_ticks(&mut app, 1);
    assert_eq!(roster_len(&app, second), 1);
    assert_eq!(roster_len(&app, first), 0);
}

/// Test: 400 урона по порталу с 400 hp ровно разрушают его
#[test]
fn test_exact_lethal_damage_counts_destroyed_portal() {
    let mut app = create_combat_app(42);
    let portal = spawn_portal(&mut app, Vec3::new(0.0, 1.0, -10.0), Vec3::ZERO);
    warm_up(&mut app);
    run_ticks(&mut app, 1);

    assert_eq!(app.world().get::<PortalCore>(portal).unwrap().max_integrity, 400.0);
    assert_eq!(app.world().resource::<LevelObjective>().destroyed, 0);

    send(&mut app, DamageRequest::body(portal, 400.0, None));
    run_ticks(&mut app, 1);

    let core = app.world().get::<PortalCore>(portal).unwrap();
    assert!(core.is_destroyed());
    assert_eq!(core.integrity, 0.0);
    let objective = app.world().resource::<LevelObjective>();
    assert_eq!(objective.destroyed, 1);
    assert_eq!(objective.active, 0);
}

/// Test: objective берёт формат из tuning'а
#[test]
fn test_objective_format_from_tuning() {
    let mut tuning = CombatTuning::default();
    tuning.portal.objective_format = "Порталы: {destroyed} из {total}".to_string();
    let mut app = create_combat_app_with(42, tuning);
    spawn_portal(&mut app, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
    warm_up(&mut app);
    run_ticks(&mut app, 1);

    let display = app.world().resource::<LevelObjective>().display();
    assert_eq!(display.text, "Порталы: 0 из 1");
    assert!(!display.completed);
}
