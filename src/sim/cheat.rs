//! Hidden god-mode unlocks
//!
//! Two independent trackers: a directional press sequence and a rapid tap
//! gesture in the top-left screen corner. Either toggles god-mode when
//! completed. Progress decays after a period without a matching input.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::input::Intent;

/// Up Up Down Down Left Right Left Right Melee Melee
pub const CHEAT_SEQUENCE: [Intent; 10] = [
    Intent::Up,
    Intent::Up,
    Intent::Down,
    Intent::Down,
    Intent::MoveLeft,
    Intent::MoveRight,
    Intent::MoveLeft,
    Intent::MoveRight,
    Intent::Melee,
    Intent::Melee,
];

/// Ticks without a matching press before sequence progress resets (5 s)
pub const SEQUENCE_TIMEOUT_TICKS: u32 = 300;

/// Screen corner that counts taps
pub const TAP_CORNER: Rect = Rect::new(0.0, 0.0, 80.0, 80.0);
/// Taps needed inside the corner
pub const TAPS_REQUIRED: u32 = 5;
/// Ticks without a corner tap before the count resets (2 s)
pub const TAP_TIMEOUT_TICKS: u32 = 120;

/// Progress through [`CHEAT_SEQUENCE`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheatSequence {
    progress: usize,
    idle_ticks: u32,
}

impl CheatSequence {
    /// Feed one press. Returns true when the sequence completes.
    pub fn press(&mut self, intent: Intent) -> bool {
        if CHEAT_SEQUENCE[self.progress] == intent {
            self.progress += 1;
            self.idle_ticks = 0;
            if self.progress == CHEAT_SEQUENCE.len() {
                self.progress = 0;
                return true;
            }
        } else {
            self.progress = 0;
        }
        false
    }

    /// Age the progress by one tick
    pub fn tick(&mut self) {
        self.idle_ticks += 1;
        if self.idle_ticks > SEQUENCE_TIMEOUT_TICKS {
            self.progress = 0;
            self.idle_ticks = 0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Consecutive taps inside [`TAP_CORNER`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CornerTaps {
    count: u32,
    idle_ticks: u32,
}

impl CornerTaps {
    /// Feed one tap position. Returns true when the gesture completes.
    pub fn tap(&mut self, pos: Vec2) -> bool {
        let inside = pos.x >= TAP_CORNER.x
            && pos.x <= TAP_CORNER.right()
            && pos.y >= TAP_CORNER.y
            && pos.y <= TAP_CORNER.bottom();
        self.idle_ticks = 0;
        if !inside {
            self.count = 0;
            return false;
        }
        self.count += 1;
        if self.count >= TAPS_REQUIRED {
            self.count = 0;
            return true;
        }
        false
    }

    pub fn tick(&mut self) {
        self.idle_ticks += 1;
        if self.idle_ticks > TAP_TIMEOUT_TICKS {
            self.count = 0;
            self.idle_ticks = 0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `presses` and report whether any of them completed the sequence
    fn completes(cheat: &mut CheatSequence, presses: &[Intent]) -> bool {
        presses.iter().fold(false, |done, i| cheat.press(*i) || done)
    }

    #[test]
    fn test_full_sequence_completes() {
        let mut cheat = CheatSequence::default();
        let results: Vec<bool> = CHEAT_SEQUENCE.iter().map(|i| cheat.press(*i)).collect();
        assert_eq!(results.iter().filter(|r| **r).count(), 1);
        assert!(results[CHEAT_SEQUENCE.len() - 1]);

        // Completion starts over
        assert!(!completes(&mut cheat, &CHEAT_SEQUENCE[2..]));
    }

    #[test]
    fn test_wrong_press_resets() {
        let mut cheat = CheatSequence::default();
        cheat.press(Intent::Up);
        cheat.press(Intent::Up);
        cheat.press(Intent::Jump);
        assert!(!completes(&mut cheat, &CHEAT_SEQUENCE[2..]));
        assert!(completes(&mut cheat, &CHEAT_SEQUENCE));
    }

    #[test]
    fn test_sequence_times_out() {
        let mut cheat = CheatSequence::default();
        cheat.press(Intent::Up);
        for _ in 0..=SEQUENCE_TIMEOUT_TICKS {
            cheat.tick();
        }
        assert!(!completes(&mut cheat, &CHEAT_SEQUENCE[1..]));
    }

    #[test]
    fn test_progress_survives_short_pauses() {
        let mut cheat = CheatSequence::default();
        cheat.press(Intent::Up);
        for _ in 0..SEQUENCE_TIMEOUT_TICKS {
            cheat.tick();
        }
        assert!(completes(&mut cheat, &CHEAT_SEQUENCE[1..]));
    }

    fn taps_complete(taps: &mut CornerTaps, n: u32) -> bool {
        (0..n).fold(false, |done, _| taps.tap(Vec2::new(10.0, 10.0)) || done)
    }

    #[test]
    fn test_corner_taps() {
        let mut taps = CornerTaps::default();
        let corner = Vec2::new(20.0, 30.0);
        for _ in 0..TAPS_REQUIRED - 1 {
            assert!(!taps.tap(corner));
        }
        assert!(taps.tap(corner));
        assert!(!taps_complete(&mut taps, TAPS_REQUIRED - 1));
    }

    #[test]
    fn test_tap_outside_corner_resets() {
        let mut taps = CornerTaps::default();
        taps.tap(Vec2::new(10.0, 10.0));
        taps.tap(Vec2::new(10.0, 10.0));
        taps.tap(Vec2::new(400.0, 300.0));
        assert!(!taps_complete(&mut taps, TAPS_REQUIRED - 1));
    }

    #[test]
    fn test_taps_time_out() {
        let mut taps = CornerTaps::default();
        taps.tap(Vec2::new(10.0, 10.0));
        for _ in 0..=TAP_TIMEOUT_TICKS {
            taps.tick();
        }
        assert!(!taps_complete(&mut taps, TAPS_REQUIRED - 1));
    }
}
