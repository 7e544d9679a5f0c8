//! Effect requests emitted by a simulation tick.
//! The presentation layer consumes these for sound, music and particles;
//! the simulation itself never performs side effects.

use serde::{Deserialize, Serialize};

use super::entity::{EnemyTag, ItemKind, MeleeOrientation};
use super::state::GameMode;

/// What destroyed an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillSource {
    Melee,
    Beam,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ModeChanged { from: GameMode, to: GameMode },
    Jumped,
    MeleeStarted { orientation: MeleeOrientation },
    BeamFired { x: f32, y: f32 },
    EnemyKilled { tag: EnemyTag, by: KillSource, x: f32, y: f32 },
    ItemCollected { kind: ItemKind, x: f32, y: f32 },
    PlayerDamaged { life_left: u8 },
    FellOut,
    StageCleared { stage: u32 },
    GameCleared,
    GameOver,
    StartMusic,
    StopMusic,
    MuteToggled { muted: bool },
    GodModeToggled { enabled: bool },
}
