//! Глобальная пауза
//!
//! Один флаг на мир. Пока он поднят, всё что продвигается временем
//! (combat clock, отложенные эффекты, AI, спавн порталов, деспавн) не тикает:
//! эти фазы `CombatSet` гейтятся `combat_running`. Косметика (отдача)
//! идёт по real time и паузу не замечает.

use bevy::prelude::*;

use crate::logger::log_info;
use crate::CombatSet;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct PauseState {
    pub paused: bool,
}

impl PauseState {
    pub fn toggle(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

/// Event: переключить паузу (кнопка паузы / закрытие pause-меню)
#[derive(Event, Debug, Clone, Copy, Default, PartialEq)]
pub struct TogglePauseIntent;

/// Event: пауза включена / выключена (UI панели)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PauseChanged {
    pub paused: bool,
}

/// Run condition: симуляция не на паузе
pub fn combat_running(pause: Res<PauseState>) -> bool {
    !pause.paused
}

/// Система: применяет toggle-запросы (несколько за tick применяются по очереди)
pub fn toggle_pause(
    mut intents: EventReader<TogglePauseIntent>,
    mut pause: ResMut<PauseState>,
    mut changes: EventWriter<PauseChanged>,
) {
    for _ in intents.read() {
        let paused = pause.toggle();
        log_info(if paused { "Simulation paused" } else { "Simulation resumed" });
        changes.write(PauseChanged { paused });
    }
}

pub struct PausePlugin;

impl Plugin for PausePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PauseState>()
            .register_type::<PauseState>()
            .add_event::<TogglePauseIntent>()
            .add_event::<PauseChanged>()
            .add_systems(
                FixedUpdate,
                toggle_pause
                    .in_set(CombatSet::Input)
                    .after(crate::input::route_player_input),
            );
    }
}
