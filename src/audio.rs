//! Audio system
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a short list of oscillator tones; a [`ToneBackend`] turns
//! them into sound (or log lines, or a test recording).

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player jumped
    Jump,
    /// Melee strike
    Attack,
    /// Item collected or enemy destroyed
    ItemGet,
    /// Player took a hit
    Damage,
    /// Run ended
    GameOver,
    /// Short fanfare between stages
    StageClear,
    /// Final stage cleared
    GameClear,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// One oscillator note with an exponential fade-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub waveform: Waveform,
    /// Seconds
    pub duration: f32,
    /// Seconds after the effect starts
    pub delay: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
}

const fn tone(freq: f32, waveform: Waveform, duration: f32, delay: f32) -> Tone {
    Tone {
        freq,
        waveform,
        duration,
        delay,
        gain: 0.3,
    }
}

const JUMP: &[Tone] = &[
    tone(400.0, Waveform::Sine, 0.1, 0.0),
    tone(500.0, Waveform::Sine, 0.1, 0.05),
];
const ATTACK: &[Tone] = &[
    tone(200.0, Waveform::Sawtooth, 0.05, 0.0),
    tone(150.0, Waveform::Square, 0.05, 0.03),
];
const ITEM_GET: &[Tone] = &[
    tone(800.0, Waveform::Sine, 0.1, 0.0),
    tone(1000.0, Waveform::Sine, 0.1, 0.05),
    tone(1200.0, Waveform::Sine, 0.1, 0.1),
];
const DAMAGE: &[Tone] = &[
    tone(150.0, Waveform::Sawtooth, 0.2, 0.0),
    tone(100.0, Waveform::Sawtooth, 0.2, 0.1),
];
const GAME_OVER: &[Tone] = &[
    tone(200.0, Waveform::Sawtooth, 0.3, 0.0),
    tone(150.0, Waveform::Sawtooth, 0.3, 0.3),
];
const STAGE_CLEAR: &[Tone] = &[
    tone(523.0, Waveform::Sine, 0.15, 0.0),
    tone(659.0, Waveform::Sine, 0.15, 0.1),
    tone(784.0, Waveform::Sine, 0.15, 0.2),
];
const GAME_CLEAR: &[Tone] = &[
    tone(523.0, Waveform::Sine, 0.2, 0.0),
    tone(659.0, Waveform::Sine, 0.2, 0.15),
    tone(784.0, Waveform::Sine, 0.2, 0.3),
    tone(1047.0, Waveform::Sine, 0.2, 0.45),
];

/// Background loop: (frequency, seconds), square wave at low gain
pub const BGM_MELODY: [(f32, f32); 7] = [
    (523.0, 0.2),
    (587.0, 0.2),
    (659.0, 0.2),
    (523.0, 0.2),
    (659.0, 0.2),
    (698.0, 0.2),
    (784.0, 0.4),
];
pub const BGM_GAIN: f32 = 0.1;

impl SoundEffect {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Jump => JUMP,
            SoundEffect::Attack => ATTACK,
            SoundEffect::ItemGet => ITEM_GET,
            SoundEffect::Damage => DAMAGE,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::StageClear => STAGE_CLEAR,
            SoundEffect::GameClear => GAME_CLEAR,
        }
    }

    /// Effect cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::MeleeStarted { .. } => Some(SoundEffect::Attack),
            GameEvent::ItemCollected { .. } | GameEvent::EnemyKilled { .. } => {
                Some(SoundEffect::ItemGet)
            }
            GameEvent::PlayerDamaged { .. } => Some(SoundEffect::Damage),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::StageCleared { .. } => Some(SoundEffect::StageClear),
            GameEvent::GameCleared => Some(SoundEffect::GameClear),
            _ => None,
        }
    }
}

/// Something that can actually make noise
pub trait ToneBackend {
    /// Schedule one tone at the given (already scaled) gain
    fn play_tone(&mut self, tone: &Tone, gain: f32);
    /// Start looping the background melody at the given gain
    fn start_loop(&mut self, melody: &[(f32, f32)], gain: f32);
    fn stop_loop(&mut self);
}

/// Backend for headless runs: every cue becomes a debug log line
#[derive(Debug, Default)]
pub struct LogBackend;

impl ToneBackend for LogBackend {
    fn play_tone(&mut self, tone: &Tone, gain: f32) {
        log::debug!(
            "tone {:.0} Hz {:?} {:.2}s +{:.2}s gain {:.2}",
            tone.freq,
            tone.waveform,
            tone.duration,
            tone.delay,
            gain
        );
    }

    fn start_loop(&mut self, melody: &[(f32, f32)], gain: f32) {
        log::debug!("bgm start ({} notes, gain {:.2})", melody.len(), gain);
    }

    fn stop_loop(&mut self) {
        log::debug!("bgm stop");
    }
}

/// Audio manager for the game
pub struct AudioManager<B: ToneBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl<B: ToneBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.start_muted,
            music_playing: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_music();
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        for tone in effect.tones() {
            self.backend.play_tone(tone, tone.gain * vol);
        }
    }

    pub fn start_music(&mut self) {
        if self.muted {
            return;
        }
        // Restart rather than layer a second loop
        self.stop_music();
        let gain = BGM_GAIN * self.master_volume * self.music_volume;
        self.backend.start_loop(&BGM_MELODY, gain);
        self.music_playing = true;
    }

    pub fn stop_music(&mut self) {
        if self.music_playing {
            self.backend.stop_loop();
            self.music_playing = false;
        }
    }

    /// React to the events of one tick
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::StartMusic => self.start_music(),
                GameEvent::StopMusic => self.stop_music(),
                GameEvent::MuteToggled { muted } => self.set_muted(*muted),
                other => {
                    if let Some(effect) = SoundEffect::for_event(other) {
                        self.play(effect);
                    }
                }
            }
        }
    }
}
