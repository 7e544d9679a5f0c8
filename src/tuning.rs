//! Data-driven game balance
//!
//! All velocities are in pixels per tick and all durations in ticks at the
//! fixed 60 Hz timestep. Partial JSON files are accepted: missing fields keep
//! their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player movement ===
    /// Horizontal run speed
    pub player_speed: f32,
    /// Upward launch speed of a jump (applied as negative vy)
    pub jump_power: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Horizontal velocity multiplier per grounded tick with no input
    pub friction: f32,
    pub max_life: u8,
    pub invincibility_ticks: u32,

    // === Melee ===
    pub melee_active_ticks: u32,
    pub melee_cooldown_ticks: u32,

    // === Beam ===
    pub beam_speed: f32,
    pub beam_lifetime_ticks: u32,
    /// Ticks between shots while the fire intent is held
    pub beam_interval_ticks: u32,
    /// Energy consumed per shot
    pub beam_cost: f32,
    /// Energy regained per second while not firing
    pub beam_regen_per_second: f32,
    pub beam_energy_max: f32,
    /// Score needed before the beam can be used without god-mode
    pub beam_unlock_score: u64,

    // === Spawning ===
    /// Enemy cadence on stage 1
    pub enemy_spawn_ticks_easy: u32,
    /// Enemy cadence on the final stage
    pub enemy_spawn_ticks_hard: u32,
    pub item_spawn_ticks: u32,

    // === Enemies ===
    pub flyer_speed: f32,
    pub walker_speed: f32,
    /// Chance per grounded tick that a walker hops
    pub walker_hop_chance: f64,
    pub walker_hop_power: f32,

    // === Scoring ===
    pub score_melee_kill: u64,
    pub score_beam_kill: u64,
    pub score_item: u64,

    // === Stage generation safety factors ===
    /// Fraction of the full-speed jump distance a gap may span
    pub gap_safety: f32,
    /// Fraction of the jump apex an obstacle may reach
    pub obstacle_safety: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 6.0,
            jump_power: 20.0,
            gravity: 0.8,
            friction: 0.8,
            max_life: 3,
            invincibility_ticks: 120,

            melee_active_ticks: 9,
            melee_cooldown_ticks: 30,

            beam_speed: 15.0,
            beam_lifetime_ticks: 120,
            beam_interval_ticks: 30,
            beam_cost: 10.0,
            beam_regen_per_second: 5.0,
            beam_energy_max: 100.0,
            beam_unlock_score: 1000,

            enemy_spawn_ticks_easy: 180,
            enemy_spawn_ticks_hard: 90,
            item_spawn_ticks: 120,

            flyer_speed: 2.0,
            walker_speed: 6.0,
            walker_hop_chance: 0.005,
            walker_hop_power: 12.0,

            score_melee_kill: 500,
            score_beam_kill: 200,
            score_item: 100,

            gap_safety: 0.8,
            obstacle_safety: 0.9,
        }
    }
}

impl Tuning {
    /// Ticks from takeoff to the jump apex
    pub fn air_ticks(&self) -> f32 {
        self.jump_power / self.gravity
    }

    /// Apex height of a standing jump
    pub fn max_jump_height(&self) -> f32 {
        let t = self.air_ticks();
        self.jump_power * t - 0.5 * self.gravity * t * t
    }

    /// Tallest obstacle the generator may emit
    pub fn max_obstacle_height(&self) -> f32 {
        self.max_jump_height() * self.obstacle_safety
    }

    /// Widest gap the generator may emit (a full-speed jump, with margin)
    pub fn max_gap_width(&self) -> f32 {
        self.player_speed * self.air_ticks() * 2.0 * self.gap_safety
    }

    /// Energy regained per tick while not firing
    pub fn beam_regen_per_tick(&self) -> f32 {
        self.beam_regen_per_second * SIM_DT
    }

    /// Enemy cadence for a difficulty in [0, 1]
    pub fn enemy_spawn_ticks(&self, difficulty: f32) -> u32 {
        let easy = self.enemy_spawn_ticks_easy as f32;
        let hard = self.enemy_spawn_ticks_hard as f32;
        ((easy - difficulty * (easy - hard)).floor() as u32).max(1)
    }

    /// Reject values that would break the simulation or the traversal limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::invalid(field, format!("must be positive, got {v}")))
            }
        }

        positive("player_speed", self.player_speed)?;
        positive("jump_power", self.jump_power)?;
        positive("gravity", self.gravity)?;
        positive("beam_speed", self.beam_speed)?;
        positive("beam_energy_max", self.beam_energy_max)?;
        positive("walker_hop_power", self.walker_hop_power)?;

        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::invalid("friction", "must be within 0..=1"));
        }
        if self.max_life == 0 {
            return Err(ConfigError::invalid("max_life", "must be at least 1"));
        }
        if self.beam_cost < 0.0 || self.beam_cost > self.beam_energy_max {
            return Err(ConfigError::invalid(
                "beam_cost",
                "must be within 0..=beam_energy_max",
            ));
        }
        if self.beam_regen_per_second < 0.0 {
            return Err(ConfigError::invalid("beam_regen_per_second", "must not be negative"));
        }
        if self.beam_interval_ticks == 0 || self.item_spawn_ticks == 0 {
            return Err(ConfigError::invalid(
                "beam_interval_ticks/item_spawn_ticks",
                "cadences must be at least 1 tick",
            ));
        }
        if self.enemy_spawn_ticks_hard == 0 || self.enemy_spawn_ticks_hard > self.enemy_spawn_ticks_easy {
            return Err(ConfigError::invalid(
                "enemy_spawn_ticks_hard",
                "must be within 1..=enemy_spawn_ticks_easy",
            ));
        }
        if !(0.0..=1.0).contains(&self.walker_hop_chance) {
            return Err(ConfigError::invalid("walker_hop_chance", "must be a probability"));
        }
        if !(self.gap_safety > 0.0 && self.gap_safety <= 1.0) {
            return Err(ConfigError::invalid("gap_safety", "must be within (0, 1]"));
        }
        if !(self.obstacle_safety > 0.0 && self.obstacle_safety <= 1.0) {
            return Err(ConfigError::invalid("obstacle_safety", "must be within (0, 1]"));
        }
        Ok(())
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_limits() {
        let t = Tuning::default();
        assert!((t.air_ticks() - 25.0).abs() < 1e-4);
        assert!((t.max_jump_height() - 250.0).abs() < 1e-3);
        assert!((t.max_obstacle_height() - 225.0).abs() < 1e-3);
        assert!((t.max_gap_width() - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_cadence_scales_with_difficulty() {
        let t = Tuning::default();
        assert_eq!(t.enemy_spawn_ticks(0.0), 180);
        assert_eq!(t.enemy_spawn_ticks(0.5), 135);
        assert_eq!(t.enemy_spawn_ticks(1.0), 90);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "player_speed": 7.5 }"#).unwrap();
        assert_eq!(t.player_speed, 7.5);
        assert_eq!(t.jump_power, Tuning::default().jump_power);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "gravity": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "gravity", .. }));

        let err = Tuning::from_json(r#"{ "beam_cost": 500.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "beam_cost", .. }));

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
