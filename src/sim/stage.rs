//! Procedural stage layout
//!
//! A stage is a run of ground segments separated by gaps, ending in guaranteed
//! ground around the goal, plus scattered obstacle blocks. Gap widths and
//! obstacle heights are capped by what a full-speed jump can clear, so every
//! layout is traversable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::error::StageError;
use crate::tuning::Tuning;
use crate::{difficulty_for_stage, goal_x_for_stage};

/// Validated 1-based stage index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Stage(u32);

impl Stage {
    pub const FIRST: Stage = Stage(1);
    pub const LAST: Stage = Stage(STAGE_COUNT);

    pub fn new(index: u32) -> Result<Self, StageError> {
        if (1..=STAGE_COUNT).contains(&index) {
            Ok(Stage(index))
        } else {
            Err(StageError::OutOfRange(index))
        }
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// The following stage, or None after the last one
    pub fn next(self) -> Option<Stage> {
        Stage::new(self.0 + 1).ok()
    }

    /// 0.0 on stage 1 up to 1.0 on the last stage
    pub fn difficulty(self) -> f32 {
        difficulty_for_stage(self.0)
    }

    pub fn goal_x(self) -> f32 {
        goal_x_for_stage(self.0)
    }
}

/// Kind of generated platform, for rendering and invariant checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Ground,
    Bridge,
    Obstacle,
}

/// Generated stage geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageLayout {
    pub stage: Stage,
    pub platforms: Vec<Rect>,
    /// Parallel to `platforms`
    pub kinds: Vec<PlatformKind>,
    pub goal_x: f32,
}

impl StageLayout {
    fn push(&mut self, rect: Rect, kind: PlatformKind) {
        self.platforms.push(rect);
        self.kinds.push(kind);
    }

    /// Ground-level spans merged into disjoint, sorted intervals
    pub fn ground_spans(&self) -> Vec<(f32, f32)> {
        let mut spans: Vec<(f32, f32)> = self
            .platforms
            .iter()
            .zip(&self.kinds)
            .filter(|(_, k)| **k == PlatformKind::Ground)
            .map(|(p, _)| (p.x, p.right()))
            .collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut merged: Vec<(f32, f32)> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match merged.last_mut() {
                Some(last) if start <= last.1 => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }
        merged
    }

    /// Widest hole between consecutive ground spans
    pub fn widest_gap(&self) -> f32 {
        self.ground_spans()
            .windows(2)
            .map(|w| w[1].0 - w[0].1)
            .fold(0.0, f32::max)
    }

    /// Tallest obstacle block
    pub fn tallest_obstacle(&self) -> f32 {
        self.platforms
            .iter()
            .zip(&self.kinds)
            .filter(|(_, k)| **k == PlatformKind::Obstacle)
            .map(|(p, _)| p.h)
            .fold(0.0, f32::max)
    }
}

/// Generate the layout for a stage
pub fn generate_stage<R: Rng>(stage: Stage, tuning: &Tuning, rng: &mut R) -> StageLayout {
    let goal_x = stage.goal_x();
    let difficulty = stage.difficulty();
    let max_gap = tuning.max_gap_width();
    let max_obstacle = tuning.max_obstacle_height();

    let mut layout = StageLayout {
        stage,
        platforms: Vec::new(),
        kinds: Vec::new(),
        goal_x,
    };

    // Segments get shorter and holes wider and more frequent as stages rise
    let min_segment = PLAYER_WIDTH * 3.0 - difficulty * 100.0;
    let segment_spread = 200.0 - difficulty * 50.0;
    let min_gap = 50.0 + difficulty * 30.0;
    let max_drawn_gap = (max_gap * (0.6 + difficulty * 0.3)).max(min_gap);
    let gap_chance = 0.5 + difficulty as f64 * 0.3;
    let bridge_threshold = max_gap * (0.5 + difficulty * 0.2);
    let obstacle_count = (3.0 + difficulty * 4.0).floor() as u32;

    let mut cursor = 0.0f32;
    while cursor < goal_x - 200.0 {
        let length = (min_segment + rng.random::<f32>() * segment_spread).floor();
        layout.push(
            Rect::new(cursor.floor(), GROUND_Y, length, GROUND_HEIGHT),
            PlatformKind::Ground,
        );
        cursor += length;

        if rng.random_bool(gap_chance) {
            let drawn = min_gap + rng.random::<f32>() * (max_drawn_gap - min_gap);
            let gap = drawn.min(max_gap).floor();
            if gap > bridge_threshold {
                layout.push(
                    Rect::new(
                        (cursor + gap / 2.0 - BRIDGE_WIDTH / 2.0).floor(),
                        GROUND_Y - BRIDGE_LIFT,
                        BRIDGE_WIDTH,
                        BRIDGE_HEIGHT,
                    ),
                    PlatformKind::Bridge,
                );
            }
            cursor += gap;
        }
    }

    // Guaranteed ground up to, under and past the goal
    layout.push(
        Rect::new(goal_x - 300.0, GROUND_Y, 300.0 + 100.0, GROUND_HEIGHT),
        PlatformKind::Ground,
    );
    layout.push(
        Rect::new(goal_x + 100.0, GROUND_Y, 500.0, GROUND_HEIGHT),
        PlatformKind::Ground,
    );

    // Obstacles only where a whole block rests on one stretch of ground
    let ground = layout.ground_spans();
    let spacing = (goal_x - 400.0) / (obstacle_count + 1) as f32;
    for i in 1..=obstacle_count {
        let jitter = (rng.random::<f32>() - 0.5) * 200.0;
        let x = (spacing * i as f32 + jitter).floor();
        let height = (50.0 + rng.random::<f32>() * (50.0 + difficulty * 50.0))
            .min(max_obstacle)
            .floor();

        if x <= 400.0 || x >= goal_x - 200.0 {
            continue;
        }
        let supported = ground
            .iter()
            .any(|(start, end)| x >= *start && x + OBSTACLE_WIDTH <= *end);
        if !supported {
            log::debug!("Stage {}: skipped obstacle at x={} over a gap", stage.index(), x);
            continue;
        }
        layout.push(
            Rect::new(x, GROUND_Y - height, OBSTACLE_WIDTH, height),
            PlatformKind::Obstacle,
        );
    }

    log::info!(
        "Stage {}: goal_x={}, platforms={}, widest_gap={}, tallest_obstacle={}",
        stage.index(),
        goal_x,
        layout.platforms.len(),
        layout.widest_gap(),
        layout.tallest_obstacle()
    );

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_stage_bounds() {
        assert_eq!(Stage::new(0), Err(StageError::OutOfRange(0)));
        assert_eq!(Stage::new(6), Err(StageError::OutOfRange(6)));
        assert_eq!(Stage::new(3).map(Stage::index), Ok(3));
        assert_eq!(Stage::LAST.next(), None);
        assert_eq!(Stage::FIRST.next(), Stage::new(2).ok());
        assert!(Stage::LAST.is_last());
    }

    #[test]
    fn test_goal_position_per_stage() {
        assert_eq!(Stage::FIRST.goal_x(), 3000.0);
        assert_eq!(Stage::LAST.goal_x(), 7000.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let tuning = Tuning::default();
        let stage = Stage::new(3).unwrap();
        let a = generate_stage(stage, &tuning, &mut Pcg32::seed_from_u64(42));
        let b = generate_stage(stage, &tuning, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.platforms, b.platforms);
    }

    #[test]
    fn test_start_area_is_solid_ground() {
        let tuning = Tuning::default();
        for seed in 0..50 {
            let layout = generate_stage(Stage::FIRST, &tuning, &mut Pcg32::seed_from_u64(seed));
            let first = layout.ground_spans()[0];
            assert_eq!(first.0, 0.0);
            // Shortest possible first segment still covers the spawn point
            assert!(first.1 >= PLAYER_START_X + PLAYER_WIDTH);
            // Nothing but ground in front of the spawn
            for (p, k) in layout.platforms.iter().zip(&layout.kinds) {
                if *k != PlatformKind::Ground {
                    assert!(p.x > PLAYER_START_X + PLAYER_WIDTH);
                }
            }
        }
    }

    #[test]
    fn test_goal_has_ground_under_and_past_it() {
        let tuning = Tuning::default();
        for index in 1..=STAGE_COUNT {
            let stage = Stage::new(index).unwrap();
            let layout = generate_stage(stage, &tuning, &mut Pcg32::seed_from_u64(index as u64));
            let goal_x = layout.goal_x;
            let covered = layout
                .ground_spans()
                .iter()
                .any(|(start, end)| *start <= goal_x - 300.0 && *end >= goal_x + 600.0);
            assert!(covered, "stage {index} goal not on continuous ground");
        }
    }

    proptest! {
        #[test]
        fn every_layout_is_traversable(seed in any::<u64>(), index in 1u32..=STAGE_COUNT) {
            let tuning = Tuning::default();
            let stage = Stage::new(index).unwrap();
            let layout = generate_stage(stage, &tuning, &mut Pcg32::seed_from_u64(seed));

            prop_assert!(!layout.platforms.is_empty());
            prop_assert_eq!(layout.platforms.len(), layout.kinds.len());
            prop_assert!(layout.widest_gap() <= tuning.max_gap_width());
            prop_assert!(layout.tallest_obstacle() <= tuning.max_obstacle_height());

            let last_end = layout.ground_spans().last().map(|s| s.1).unwrap_or(0.0);
            prop_assert!(last_end >= layout.goal_x + GOAL_WIDTH);
        }
    }
}
