//! Read-only render contract
//!
//! A [`Snapshot`] is everything a presentation layer may know about one
//! tick. It is built from a `&GameState` and owns its data, so a renderer
//! can hold it across frames or ship it over a channel as JSON.

use serde::Serialize;

use crate::sim::{
    EnemyTag, Facing, GameMode, GameState, ItemKind, MeleeOrientation, PlatformKind, Rect,
};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub facing: Facing,
    /// False on the hidden half of a blink
    pub visible: bool,
    /// Melee live or beam held: draw the attack pose
    pub attacking: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformView {
    pub rect: Rect,
    pub kind: PlatformKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub tag: EnemyTag,
    pub rect: Rect,
    /// Patrol direction, for sprite flipping
    pub dir: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: u32,
    pub kind: ItemKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize)]
pub struct BeamView {
    pub id: u32,
    pub rect: Rect,
    pub facing: Facing,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeleeView {
    pub rect: Rect,
    pub orientation: MeleeOrientation,
    pub active: bool,
}

/// Everything visible after one tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub score: u64,
    pub stage: u32,
    pub life: u8,
    pub max_life: u8,
    pub camera_x: f32,
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    pub goal: Rect,
    pub enemies: Vec<EnemyView>,
    pub items: Vec<ItemView>,
    pub beams: Vec<BeamView>,
    pub melee: MeleeView,
    pub energy_fraction: f32,
    pub beam_unlocked: bool,
    pub god_mode: bool,
    pub muted: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            mode: state.mode,
            score: state.score,
            stage: state.stage.index(),
            life: player.life,
            max_life: state.tuning.max_life,
            camera_x: state.camera_x,
            player: PlayerView {
                rect: player.rect(),
                facing: player.facing,
                visible: player.visible,
                attacking: state.melee.is_active() || state.firing,
            },
            platforms: state
                .platforms
                .iter()
                .zip(&state.platform_kinds)
                .map(|(rect, kind)| PlatformView {
                    rect: *rect,
                    kind: *kind,
                })
                .collect(),
            goal: state.goal.rect,
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    tag: e.kind.tag(),
                    rect: e.rect(),
                    dir: e.dir,
                })
                .collect(),
            items: state
                .items
                .iter()
                .map(|i| ItemView {
                    id: i.id,
                    kind: i.kind,
                    rect: i.rect(),
                })
                .collect(),
            beams: state
                .beams
                .iter()
                .map(|b| BeamView {
                    id: b.id,
                    rect: b.rect(),
                    facing: b.facing,
                })
                .collect(),
            melee: MeleeView {
                rect: state.melee.rect,
                orientation: state.melee.orientation,
                active: state.melee.is_active(),
            },
            energy_fraction: state.energy.fraction(),
            beam_unlocked: state.beam_unlocked(),
            god_mode: player.god_mode,
            muted: state.muted,
        }
    }

    /// Compact JSON for logs and external viewers
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
