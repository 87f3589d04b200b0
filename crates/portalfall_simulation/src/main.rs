//! Headless симуляция Portalfall
//!
//! Скриптованный бой без рендера: игрок с зажатым спуском против двух порталов.
//! Первый аргумент (опционально): путь к TOML tuning'у.

use std::path::Path;

use bevy::prelude::*;
use portalfall_simulation::portal::{portal_bundle, PortalCore};
use portalfall_simulation::*;

fn load_tuning() -> CombatTuning {
    let Some(path) = std::env::args().nth(1) else {
        return CombatTuning::default();
    };

    match CombatTuning::load(Path::new(&path)) {
        Ok(tuning) => {
            log_info(&format!("Tuning loaded from {}", path));
            tuning
        }
        Err(err) => {
            log_error(&format!("Tuning {} rejected ({}), using defaults", path, err));
            CombatTuning::default()
        }
    }
}

fn main() {
    let seed = 42;
    println!("Starting Portalfall headless simulation (seed: {})", seed);

    let tuning = load_tuning();
    let mut app = create_headless_app(seed);
    app.insert_resource(tuning.clone());
    app.add_plugins(SimulationPlugin);

    let player = {
        let world = app.world_mut();
        let player = world.spawn(player_bundle(Transform::default(), &tuning)).id();

        // Два портала прямо по линии огня, адверсарии выходят у них из-за спины
        for x in [-1.0, 1.0] {
            let core = PortalCore::from_tuning(&tuning.portal)
                .with_spawn_offset(Vec3::new(0.0, -1.0, -4.0));
            world.spawn(portal_bundle(
                Transform::from_xyz(x, 1.6, -12.0),
                core,
            ));
        }
        world.spawn((Transform::from_xyz(0.0, 0.0, 1.5), ExitGate::to("next_level")));

        player
    };

    // Прогрев часов (0 fixed tick'ов), затем зажимаем спуск
    app.update();
    app.world_mut().send_event(PlayerInput::pressed(InputAction::Fire));

    for tick in 0..1000 {
        let portal_x = if tick < 500 { -1.0 } else { 1.0 };
        if let Some(mut aim) = app.world_mut().get_mut::<AimRay>(player) {
            *aim = AimRay::looking_at(Vec3::new(0.0, 1.6, 0.0), Vec3::new(portal_x, 1.6, -12.0));
        }

        let needs_reload = app
            .world()
            .get::<Ammo>(player)
            .is_some_and(|ammo| ammo.magazine == 0 && ammo.reserve > 0);
        if needs_reload {
            app.world_mut().send_event(PlayerInput::pressed(InputAction::Reload));
            app.world_mut().send_event(PlayerInput::pressed(InputAction::Fire));
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let kills = world.resource::<KillScore>();
            let objective = world.resource::<LevelObjective>().display();
            let health = world
                .get::<PlayerLedger>(player)
                .map(|ledger| ledger.health.current)
                .unwrap_or(0);
            println!(
                "Tick {}: {} entities, kills {} ({} headshots), hp {}, \"{}\"",
                tick,
                world.entities().len(),
                kills.kills,
                kills.headshots,
                health,
                objective.text
            );
        }
    }

    app.world_mut().send_event(PlayerInput::pressed(InputAction::Interact));
    app.update();

    let objective = app.world().resource::<LevelObjective>();
    println!(
        "Simulation complete! exit activated: {}",
        objective.exit_activated()
    );
}
