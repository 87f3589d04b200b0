//! Cue-события для внешних коллабораторов (анимации, VFX, HUD, game flow)
//!
//! Симуляция только шлёт их, внутри crate'а их никто не читает.

use bevy::prelude::*;

use crate::ai::AttackVariant;
use crate::components::PickupKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCueKind {
    /// Эффект урона по игроку (экран, вспышка)
    PlayerHurt,
    PlayerDeath,
    /// Замах адверсария
    Attack(AttackVariant),
    LightHit,
    HardHit,
    Death,
    HeadshotDeath,
    Reload,
}

/// Event: запустить анимацию / триггер на entity
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationCue {
    pub entity: Entity,
    pub kind: AnimationCueKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    MuzzleFlash,
    BloodSpray,
    Impact,
    PortalHit,
    PortalDestroyed,
}

/// Event: заспавнить эффект в мире
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EffectCue {
    pub kind: EffectKind,
    pub position: Vec3,
    /// Ориентация эффекта (нормаль поверхности / направление брызг)
    pub normal: Vec3,
}

/// Event: игрок умер, показать game over
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GameOver {
    pub player: Entity,
}

/// Event: адверсарий убит (scoring)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AdversaryKilled {
    pub entity: Entity,
    pub headshot: bool,
}

/// Event: ledger игрока изменился (HUD)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LedgerChanged {
    pub entity: Entity,
    pub health: u32,
    pub max_health: u32,
    pub shield: u32,
}

/// Event: патроны изменились (HUD "30/90")
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AmmoChanged {
    pub entity: Entity,
    pub magazine: u32,
    pub reserve: u32,
}

/// Event: в мире появился pickup (с импульсом для внешней физики)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PickupSpawned {
    pub entity: Entity,
    pub kind: PickupKind,
    pub position: Vec3,
    pub impulse: Vec3,
}

/// Event: игрок подобрал pickup
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PickupCollected {
    pub collector: Entity,
    pub kind: PickupKind,
    pub amount: u32,
}

/// Счётчик убийств (общий на уровень)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct KillScore {
    pub kills: u32,
    pub headshots: u32,
}

impl KillScore {
    pub fn add_kill(&mut self, headshot: bool) {
        self.kills += 1;
        if headshot {
            self.headshots += 1;
        }
    }
}
