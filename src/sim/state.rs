//! Game state and core simulation types
//!
//! One `GameState` is the whole session: mode, stage, score, entities, input
//! trackers and the seeded RNG. Nothing lives in globals, so two states built
//! from the same seed and fed the same inputs stay identical.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cheat::{CheatSequence, CornerTaps};
use super::entity::{Beam, BeamEnergy, Enemy, Goal, Item, MeleeAttack, Player};
use super::geometry::Rect;
use super::input::IntentSet;
use super::stage::{PlatformKind, Stage, generate_stage};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for confirm
    Start,
    /// Active gameplay
    Playing,
    /// Goal reached on stages 1-4
    StageClear,
    /// Fell out or ran out of life
    GameOver,
    /// Goal reached on the final stage
    GameClear,
}

/// Complete session state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,

    pub mode: GameMode,
    pub stage: Stage,
    pub score: u64,
    /// Ticks since the stage began (drives spawn cadence)
    pub frame: u64,
    /// World x of the viewport's left edge
    pub camera_x: f32,

    pub player: Player,
    pub melee: MeleeAttack,
    pub energy: BeamEnergy,
    /// Ticks until the held beam fires again (0 = ready)
    pub beam_cooldown: u32,
    /// Beam was fired or attempted this tick
    pub firing: bool,

    /// Current stage geometry (never empty)
    pub platforms: Vec<Rect>,
    pub platform_kinds: Vec<PlatformKind>,
    pub goal: Goal,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub beams: Vec<Beam>,

    /// Intents held during the last tick
    pub held: IntentSet,
    pub cheat: CheatSequence,
    pub corner_taps: CornerTaps,
    /// Session mute flag (audio adapter reads it)
    pub muted: bool,

    next_id: u32,
}

impl GameState {
    /// Create a session with default tuning, on the title screen
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a session with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(tuning.max_life),
            energy: BeamEnergy::full(tuning.beam_energy_max),
            tuning,
            mode: GameMode::Start,
            stage: Stage::FIRST,
            score: 0,
            frame: 0,
            camera_x: 0.0,
            melee: MeleeAttack::default(),
            beam_cooldown: 0,
            firing: false,
            platforms: Vec::new(),
            platform_kinds: Vec::new(),
            goal: Goal::at(Stage::FIRST.goal_x()),
            enemies: Vec::new(),
            items: Vec::new(),
            beams: Vec::new(),
            held: IntentSet::EMPTY,
            cheat: CheatSequence::default(),
            corner_taps: CornerTaps::default(),
            muted: false,
            next_id: 1,
        };
        state.load_stage(Stage::FIRST);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn difficulty(&self) -> f32 {
        self.stage.difficulty()
    }

    /// Beam may be used at all (energy is checked separately)
    pub fn beam_unlocked(&self) -> bool {
        self.player.god_mode || self.score >= self.tuning.beam_unlock_score
    }

    /// Regenerate geometry for `stage` and clear everything stage-local
    pub fn load_stage(&mut self, stage: Stage) {
        let layout = generate_stage(stage, &self.tuning, &mut self.rng);
        self.stage = stage;
        self.platforms = layout.platforms;
        self.platform_kinds = layout.kinds;
        self.goal = Goal::at(layout.goal_x);

        self.camera_x = 0.0;
        self.frame = 0;
        self.enemies.clear();
        self.items.clear();
        self.beams.clear();
        self.player.respawn();
        self.melee = MeleeAttack::default();
        self.beam_cooldown = 0;
        self.firing = false;
    }

    /// Back to stage 1 with a fresh player, score and energy
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.player = Player::new(self.tuning.max_life);
        self.energy = BeamEnergy::full(self.tuning.beam_energy_max);
        self.cheat.reset();
        self.corner_taps.reset();
        self.load_stage(Stage::FIRST);
    }
}
