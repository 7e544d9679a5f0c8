//! Stage Runner - a five-stage side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game modes)
//! - `renderer`: Render adapter (read-only snapshots, draw commands, asset fallback)
//! - `audio`: Effect player turning simulation events into tone cues
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, StageError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, all velocities are per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Top of the ground line and thickness of ground segments
    pub const GROUND_Y: f32 = 550.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Number of stages in a full run
    pub const STAGE_COUNT: u32 = 5;

    /// Player hitbox (independent of sprite aspect)
    pub const PLAYER_WIDTH: f32 = 120.0;
    pub const PLAYER_HEIGHT: f32 = 120.0;
    pub const PLAYER_START_X: f32 = 100.0;
    /// Inset of the foot band from each side of the player box
    pub const FOOT_MARGIN: f32 = 10.0;
    /// How far below a platform top the feet may sit and still count as resting
    pub const SUPPORT_TOLERANCE: f32 = 5.0;

    /// Camera keeps the player this far from the left edge
    pub const CAMERA_OFFSET: f32 = 400.0;
    /// Spawn distance ahead of the camera
    pub const SPAWN_AHEAD: f32 = 850.0;
    /// Entities further than this behind the camera are culled
    pub const CULL_MARGIN: f32 = 100.0;

    /// Goal house
    pub const GOAL_WIDTH: f32 = 120.0;
    pub const GOAL_HEIGHT: f32 = 100.0;
    pub const GOAL_BASE_X: f32 = 2000.0;
    pub const GOAL_STAGE_STRIDE: f32 = 1000.0;

    /// Entity hitboxes
    pub const FLYER_SIZE: f32 = 60.0;
    pub const WALKER_SIZE: f32 = 45.0;
    pub const ITEM_SIZE: f32 = 30.0;
    pub const BEAM_WIDTH: f32 = 40.0;
    pub const BEAM_HEIGHT: f32 = 16.0;
    pub const MELEE_SIZE: f32 = 60.0;

    /// Mid-air bridge placed over wide gaps
    pub const BRIDGE_WIDTH: f32 = 100.0;
    pub const BRIDGE_HEIGHT: f32 = 20.0;
    pub const BRIDGE_LIFT: f32 = 100.0;
    /// Obstacle block width
    pub const OBSTACLE_WIDTH: f32 = 100.0;
}

/// World x-coordinate of the goal for a stage (1-based)
#[inline]
pub fn goal_x_for_stage(stage: u32) -> f32 {
    consts::GOAL_BASE_X + stage as f32 * consts::GOAL_STAGE_STRIDE
}

/// Difficulty in [0, 1]: stage 1 is 0.0, the final stage is 1.0
#[inline]
pub fn difficulty_for_stage(stage: u32) -> f32 {
    let span = (consts::STAGE_COUNT - 1) as f32;
    (stage.saturating_sub(1) as f32 / span).clamp(0.0, 1.0)
}
