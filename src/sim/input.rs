//! Logical input intents
//!
//! The simulation never sees keys or touches. A host maps its devices to
//! [`Intent`]s and hands over one [`TickInput`] per step: which intents are
//! held, which were pressed since the previous step (in press order), and
//! where any free-standing screen taps landed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Abstract input signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    /// Aim up (upward melee, high beam)
    Up,
    /// Aim down (ground-skimming beam)
    Down,
    Jump,
    Melee,
    Beam,
    Confirm,
    Retry,
    ToggleMute,
    ToggleGodMode,
}

impl Intent {
    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Compact set of intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSet(u16);

impl IntentSet {
    pub const EMPTY: IntentSet = IntentSet(0);

    pub fn insert(&mut self, intent: Intent) {
        self.0 |= intent.bit();
    }

    #[inline]
    pub fn contains(&self, intent: Intent) -> bool {
        self.0 & intent.bit() != 0
    }
}

impl FromIterator<Intent> for IntentSet {
    fn from_iter<T: IntoIterator<Item = Intent>>(iter: T) -> Self {
        let mut set = IntentSet::EMPTY;
        for intent in iter {
            set.insert(intent);
        }
        set
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Level-triggered intents (currently held)
    pub held: IntentSet,
    /// Edge-triggered intents pressed since the last tick, oldest first
    pub pressed: Vec<Intent>,
    /// Screen-space positions of taps that did not land on a control button
    pub taps: Vec<Vec2>,
    /// External loader reports every required asset as settled
    pub assets_ready: bool,
}

impl TickInput {
    /// Convenience for tests and scripted play
    pub fn holding(held: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            held: held.into_iter().collect(),
            assets_ready: true,
            ..Default::default()
        }
    }

    /// Add a press; a pressed intent also counts as held for this tick
    pub fn press(mut self, intent: Intent) -> Self {
        self.pressed.push(intent);
        self.held.insert(intent);
        self
    }

    #[inline]
    pub fn is_held(&self, intent: Intent) -> bool {
        self.held.contains(intent)
    }

    #[inline]
    pub fn was_pressed(&self, intent: Intent) -> bool {
        self.pressed.contains(&intent)
    }
}
