//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities in px/tick, timers in ticks)
//! - Seeded RNG only, owned by the [`GameState`]
//! - Stable iteration order (insertion order of entity lists)
//! - No rendering, audio or platform dependencies; side effects are
//!   requested through [`GameEvent`]s

pub mod cheat;
pub mod collision;
pub mod entity;
pub mod event;
pub mod geometry;
pub mod input;
pub mod mode;
pub mod spawn;
pub mod stage;
pub mod state;
pub mod tick;

pub use collision::{VerticalContact, move_x, move_y};
pub use entity::{
    Beam, BeamEnergy, Enemy, EnemyKind, EnemyTag, Facing, Goal, Item, ItemKind, MeleeAttack,
    MeleeOrientation, Player,
};
pub use event::{GameEvent, KillSource};
pub use geometry::{Rect, overlaps};
pub use input::{Intent, IntentSet, TickInput};
pub use stage::{PlatformKind, Stage, StageLayout, generate_stage};
pub use state::{GameMode, GameState};
pub use tick::tick;
