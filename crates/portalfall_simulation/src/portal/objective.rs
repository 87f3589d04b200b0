//! Общий objective уровня: счётчик порталов и exit
//!
//! Один resource на уровень (не статика): сколько порталов ещё живо,
//! сколько разрушено, и был ли уже активирован exit.

use bevy::prelude::*;

use crate::config::PortalTuning;

/// Текст objective для HUD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveDisplay {
    pub text: String,
    /// Все порталы разрушены (зачёркнутый текст)
    pub completed: bool,
}

/// Objective "разрушь все порталы"
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct LevelObjective {
    pub destroyed: u32,
    pub active: u32,
    /// `{destroyed}` и `{total}` подставляются
    pub format: String,
    exit_activated: bool,
}

impl Default for LevelObjective {
    fn default() -> Self {
        Self::with_format(&PortalTuning::default().objective_format)
    }
}

impl LevelObjective {
    pub fn with_format(format: &str) -> Self {
        Self {
            destroyed: 0,
            active: 0,
            format: format.to_string(),
            exit_activated: false,
        }
    }

    /// total = живые + разрушенные (порталы могут появляться динамически)
    pub fn total(&self) -> u32 {
        self.active + self.destroyed
    }

    pub fn register_portal(&mut self) {
        self.active += 1;
    }

    pub fn portal_destroyed(&mut self) {
        self.active = self.active.saturating_sub(1);
        self.destroyed += 1;
    }

    /// true ровно один раз: когда живых порталов не осталось
    pub fn try_activate_exit(&mut self) -> bool {
        if self.exit_activated || self.active > 0 {
            return false;
        }
        self.exit_activated = true;
        true
    }

    pub fn exit_activated(&self) -> bool {
        self.exit_activated
    }

    pub fn display(&self) -> ObjectiveDisplay {
        let total = self.total();
        ObjectiveDisplay {
            text: self
                .format
                .replace("{destroyed}", &self.destroyed.to_string())
                .replace("{total}", &total.to_string()),
            completed: total > 0 && self.destroyed >= total,
        }
    }
}

/// Выход с уровня (неактивен, пока живы порталы)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ExitGate {
    pub active: bool,
    /// Куда ведёт (сцена/уровень, решает хост)
    pub destination: Option<String>,
}

impl ExitGate {
    pub fn to(destination: impl Into<String>) -> Self {
        Self {
            active: false,
            destination: Some(destination.into()),
        }
    }
}

/// Event: objective изменился (HUD)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ObjectiveUpdated {
    pub destroyed: u32,
    pub total: u32,
    pub text: String,
    pub completed: bool,
}

impl ObjectiveUpdated {
    pub fn from_objective(objective: &LevelObjective) -> Self {
        let display = objective.display();
        Self {
            destroyed: objective.destroyed,
            total: objective.total(),
            text: display.text,
            completed: display.completed,
        }
    }
}

/// Event: exit стал активным
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ExitActivated {
    pub exit: Entity,
}

/// Event: игрок вошёл в активный exit
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LevelCompleted {
    pub destination: Option<String>,
}
