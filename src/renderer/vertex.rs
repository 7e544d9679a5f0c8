//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements (also the fallback for missing sprites)
pub mod colors {
    pub const SKY: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const GROUND: [f32; 4] = [0.4, 0.26, 0.13, 1.0];
    pub const GRASS: [f32; 4] = [0.2, 0.8, 0.2, 1.0];
    pub const GOAL: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CROW: [f32; 4] = [0.15, 0.15, 0.2, 1.0];
    pub const CAT: [f32; 4] = [1.0, 0.6, 0.2, 1.0];
    pub const ITEM: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const BEAM: [f32; 4] = [0.0, 1.0, 1.0, 0.9];
    pub const MELEE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const MELEE_UP: [f32; 4] = [1.0, 0.4, 0.4, 0.5];
    pub const LIFE_FULL: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const LIFE_EMPTY: [f32; 4] = [0.33, 0.33, 0.33, 1.0];
    pub const ENERGY_BG: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const ENERGY: [f32; 4] = [0.0, 0.67, 1.0, 1.0];
    pub const ENERGY_GOD: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const HITBOX: [f32; 4] = [1.0, 0.0, 1.0, 0.35];

    /// Fallback fills with stronger separation
    pub mod high_contrast {
        pub const GROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
        pub const GRASS: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
        pub const PLAYER: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
        pub const CROW: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
        pub const CAT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
        pub const ITEM: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    }
}
