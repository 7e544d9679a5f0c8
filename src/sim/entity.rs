//! Entities and their per-tick update rules

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Horizontal facing, +1 right / -1 left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    pub life: u8,
    /// Remaining ticks of post-hit invincibility (0 = vulnerable)
    pub invincible_ticks: u32,
    /// Permanent damage immunity and free beam
    pub god_mode: bool,
    /// Blink state for the renderer
    pub visible: bool,
}

impl Player {
    pub fn new(max_life: u8) -> Self {
        Self {
            pos: Self::start_pos(),
            vel: Vec2::ZERO,
            facing: Facing::Right,
            grounded: false,
            life: max_life,
            invincible_ticks: 0,
            god_mode: false,
            visible: true,
        }
    }

    pub fn start_pos() -> Vec2 {
        Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_HEIGHT)
    }

    /// Put the player back at the stage start, at rest
    pub fn respawn(&mut self) {
        self.pos = Self::start_pos();
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Advance invincibility and recompute blink visibility
    pub fn update_blink(&mut self, frame: u64) {
        if self.god_mode {
            self.visible = (frame / 5) % 2 == 0;
            return;
        }
        if self.invincible_ticks > 0 {
            self.invincible_ticks -= 1;
            self.visible = self.invincible_ticks == 0 || (self.invincible_ticks / 6) % 2 == 0;
        } else {
            self.visible = true;
        }
    }
}

/// Melee hitbox orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeleeOrientation {
    /// In front of the player at foot level
    Forward,
    /// Above the player's head
    Up,
}

/// Short-lived melee hitbox plus its cooldown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeAttack {
    pub rect: Rect,
    pub orientation: MeleeOrientation,
    /// Ticks the hitbox stays live (0 = inactive)
    pub active_ticks: u32,
    /// Ticks until another strike may start
    pub cooldown_ticks: u32,
}

impl Default for MeleeAttack {
    fn default() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, MELEE_SIZE, MELEE_SIZE),
            orientation: MeleeOrientation::Forward,
            active_ticks: 0,
            cooldown_ticks: 0,
        }
    }
}

impl MeleeAttack {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_ticks > 0
    }

    pub fn can_trigger(&self) -> bool {
        !self.is_active() && self.cooldown_ticks == 0
    }

    /// Count down the live window and the cooldown
    pub fn tick_timers(&mut self) {
        self.active_ticks = self.active_ticks.saturating_sub(1);
        self.cooldown_ticks = self.cooldown_ticks.saturating_sub(1);
    }

    /// Place the hitbox relative to the player and start both timers.
    /// The hitbox stays where it was placed for its whole live window.
    pub fn trigger(&mut self, player: &Player, aim_up: bool, tuning: &Tuning) {
        let body = player.rect();
        let (x, y, orientation) = if aim_up {
            (
                body.center_x() - MELEE_SIZE / 2.0,
                body.y - MELEE_SIZE,
                MeleeOrientation::Up,
            )
        } else {
            let x = match player.facing {
                Facing::Right => body.right(),
                Facing::Left => body.x - MELEE_SIZE,
            };
            (x, body.bottom() - MELEE_SIZE, MeleeOrientation::Forward)
        };
        self.rect = Rect::new(x, y, MELEE_SIZE, MELEE_SIZE);
        self.orientation = orientation;
        self.active_ticks = tuning.melee_active_ticks;
        self.cooldown_ticks = tuning.melee_cooldown_ticks;
    }
}

/// Bounded beam energy pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BeamEnergy {
    current: f32,
    max: f32,
}

impl BeamEnergy {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 { 0.0 } else { self.current / self.max }
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current > 0.0 && self.current >= cost
    }

    /// Spend `cost` if available. Returns false (and spends nothing) otherwise.
    pub fn try_spend(&mut self, cost: f32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.current = (self.current - cost).max(0.0);
        true
    }

    pub fn regen(&mut self, amount: f32) {
        self.current = (self.current + amount).clamp(0.0, self.max);
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }
}

/// Variant tag used by snapshots and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTag {
    Flyer,
    Walker,
}

/// Per-variant motion data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Patrols at a fixed altitude
    Flyer,
    /// Patrols along the ground line and hops at random
    Walker { vy: f32, grounded: bool },
}

impl EnemyKind {
    pub fn tag(&self) -> EnemyTag {
        match self {
            EnemyKind::Flyer => EnemyTag::Flyer,
            EnemyKind::Walker { .. } => EnemyTag::Walker,
        }
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    /// Hitbox size, fixed regardless of sprite
    pub size: Vec2,
    pub speed: f32,
    /// Current patrol direction (+1 / -1)
    pub dir: f32,
    pub patrol_left: f32,
    pub patrol_right: f32,
}

impl Enemy {
    pub fn flyer(id: u32, x: f32, y: f32, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: EnemyKind::Flyer,
            pos: Vec2::new(x, y),
            size: Vec2::splat(FLYER_SIZE),
            speed: tuning.flyer_speed,
            dir: -1.0,
            patrol_left: x - 200.0,
            patrol_right: x + 200.0,
        }
    }

    pub fn walker(id: u32, x: f32, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: EnemyKind::Walker {
                vy: 0.0,
                grounded: true,
            },
            pos: Vec2::new(x, GROUND_Y - WALKER_SIZE),
            size: Vec2::splat(WALKER_SIZE),
            speed: tuning.walker_speed,
            dir: -1.0,
            patrol_left: x - 150.0,
            patrol_right: x + 150.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Patrol between bounds; walkers may hop and fall back to the ground line
    pub fn update<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        if self.pos.x <= self.patrol_left {
            self.dir = 1.0;
        } else if self.pos.x >= self.patrol_right {
            self.dir = -1.0;
        }
        self.pos.x += self.speed * self.dir;

        if let EnemyKind::Walker { vy, grounded } = &mut self.kind {
            if *grounded && rng.random_bool(tuning.walker_hop_chance) {
                *vy = -tuning.walker_hop_power;
                *grounded = false;
            }
            if !*grounded {
                *vy += tuning.gravity;
            }
            self.pos.y += *vy;
            let rest_y = GROUND_Y - self.size.y;
            if self.pos.y >= rest_y {
                self.pos.y = rest_y;
                *vy = 0.0;
                *grounded = true;
            }
        }
    }

    /// Still within reach of the camera
    pub fn in_range(&self, camera_x: f32) -> bool {
        self.pos.x + self.size.x >= camera_x - CULL_MARGIN
    }
}

/// Collectible kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Egg,
    Yogurt,
    Chicken,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Egg, ItemKind::Yogurt, ItemKind::Chicken];
}

/// A collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub pos: Vec2,
}

impl Item {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ITEM_SIZE, ITEM_SIZE)
    }

    pub fn in_range(&self, camera_x: f32) -> bool {
        self.pos.x + ITEM_SIZE >= camera_x - CULL_MARGIN
    }
}

/// Straight-flying projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub pos: Vec2,
    pub facing: Facing,
    pub age_ticks: u32,
}

impl Beam {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BEAM_WIDTH, BEAM_HEIGHT)
    }

    /// Advance one tick. Returns false once the beam should be removed.
    pub fn advance(&mut self, camera_x: f32, tuning: &Tuning) -> bool {
        self.pos.x += tuning.beam_speed * self.facing.sign();
        self.age_ticks += 1;
        let left = camera_x - CULL_MARGIN;
        let right = camera_x + VIEWPORT_WIDTH + CULL_MARGIN;
        self.pos.x >= left && self.pos.x <= right && self.age_ticks < tuning.beam_lifetime_ticks
    }
}

/// The stage goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
}

impl Goal {
    pub fn at(x: f32) -> Self {
        Self {
            rect: Rect::new(x, GROUND_Y - GOAL_HEIGHT, GOAL_WIDTH, GOAL_HEIGHT),
        }
    }
}
