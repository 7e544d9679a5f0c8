//! Stage Runner - headless native runner
//!
//! Drives the simulation with a scripted autopilot through the same
//! fixed-timestep accumulator a windowed host would use, routes events to the
//! audio manager and builds a render frame now and then.
//!
//! ```text
//! stage-runner [--seed N] [--ticks N] [--retries N] [--tuning PATH] [--settings PATH] [--json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use stage_runner::audio::{AudioManager, LogBackend};
    use stage_runner::consts::{GROUND_Y, MAX_SUBSTEPS, SIM_DT};
    use stage_runner::renderer::{self, AssetId, AssetTracker, Snapshot};
    use stage_runner::sim::{
        EnemyTag, GameEvent, GameMode, GameState, Intent, PlatformKind, TickInput, tick,
    };
    use stage_runner::{Settings, Tuning};

    /// Simulated display refresh for the headless loop
    const FRAME_DT: f32 = 1.0 / 30.0;
    /// Build a render frame every this many presented frames
    const RENDER_EVERY: u64 = 30;

    #[derive(Debug)]
    struct Args {
        seed: Option<u64>,
        ticks: u64,
        retries: u32,
        tuning: Option<String>,
        settings: Option<String>,
        json: bool,
    }

    impl Default for Args {
        fn default() -> Self {
            Self {
                seed: None,
                ticks: 60 * 60 * 5,
                retries: 2,
                tuning: None,
                settings: None,
                json: false,
            }
        }
    }

    fn parse_args() -> Args {
        let mut args = Args::default();
        let mut it = std::env::args().skip(1);
        while let Some(flag) = it.next() {
            match flag.as_str() {
                "--seed" => args.seed = it.next().and_then(|v| v.parse().ok()),
                "--ticks" => {
                    if let Some(n) = it.next().and_then(|v| v.parse().ok()) {
                        args.ticks = n;
                    }
                }
                "--retries" => {
                    if let Some(n) = it.next().and_then(|v| v.parse().ok()) {
                        args.retries = n;
                    }
                }
                "--tuning" => args.tuning = it.next(),
                "--settings" => args.settings = it.next(),
                "--json" => args.json = true,
                other => log::warn!("Ignoring unknown argument: {}", other),
            }
        }
        args
    }

    fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        Tuning::load(path).unwrap_or_else(|e| {
            log::warn!("{} - using default tuning", e);
            Tuning::default()
        })
    }

    fn load_settings(path: Option<&str>) -> Settings {
        let Some(path) = path else {
            return Settings::default();
        };
        Settings::load(path).unwrap_or_else(|e| {
            log::warn!("{} - using default settings", e);
            Settings::default()
        })
    }

    /// Scripted player: run right, jump hazards, hit what gets close
    fn autopilot(state: &GameState, retries_left: u32) -> TickInput {
        let mut input = TickInput::holding([]);
        match state.mode {
            GameMode::Start | GameMode::StageClear => return input.press(Intent::Confirm),
            GameMode::GameOver if retries_left > 0 => return input.press(Intent::Retry),
            GameMode::GameOver | GameMode::GameClear => return input,
            GameMode::Playing => {}
        }

        input.held.insert(Intent::MoveRight);
        let body = state.player.rect();
        let probe_x = body.right() + 30.0;

        let ground_ahead = state
            .platforms
            .iter()
            .zip(&state.platform_kinds)
            .any(|(p, k)| *k == PlatformKind::Ground && p.x <= probe_x && probe_x <= p.right());
        let obstacle_ahead = state
            .platforms
            .iter()
            .zip(&state.platform_kinds)
            .any(|(p, k)| {
                *k == PlatformKind::Obstacle && p.x >= body.right() && p.x - body.right() < 40.0
            });
        let walker_ahead = state.enemies.iter().any(|e| {
            e.kind.tag() == EnemyTag::Walker && e.pos.x > body.x && e.pos.x - body.right() < 150.0
        });
        let enemy_close = state
            .enemies
            .iter()
            .any(|e| e.pos.x > body.x && e.pos.x - body.right() < 60.0);

        if state.player.grounded && (!ground_ahead || obstacle_ahead || walker_ahead) {
            input = input.press(Intent::Jump);
        }
        if enemy_close && state.melee.can_trigger() {
            let overhead = state
                .enemies
                .iter()
                .any(|e| e.pos.y + e.size.y <= body.y && (e.pos.x - body.x).abs() < 60.0);
            if overhead {
                input.held.insert(Intent::Up);
            }
            input = input.press(Intent::Melee);
        }
        if state.beam_unlocked() && state.energy.fraction() > 0.3 {
            input.held.insert(Intent::Beam);
            if state.enemies.iter().any(|e| e.pos.y + e.size.y < GROUND_Y - 60.0) {
                input.held.insert(Intent::Up);
            }
        }
        input
    }

    /// Runner instance holding all state
    struct Runner {
        state: GameState,
        audio: AudioManager<LogBackend>,
        assets: AssetTracker,
        settings: Settings,
        accumulator: f32,
        ticks: u64,
        retries_left: u32,
        stages_cleared: u32,
        kills: u32,
        items: u32,
    }

    impl Runner {
        /// Run simulation ticks for one presented frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let mut input = autopilot(&self.state, self.retries_left);
                input.assets_ready = self.assets.is_ready();
                if input.was_pressed(Intent::Retry) {
                    self.retries_left -= 1;
                }

                let events = tick(&mut self.state, &input);
                self.record(&events);
                self.audio.handle_events(&events);

                self.accumulator -= SIM_DT;
                self.ticks += 1;
                substeps += 1;
            }
        }

        fn record(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::EnemyKilled { .. } => self.kills += 1,
                    GameEvent::ItemCollected { .. } => self.items += 1,
                    GameEvent::StageCleared { .. } | GameEvent::GameCleared => {
                        self.stages_cleared += 1
                    }
                    _ => {}
                }
            }
        }

        fn finished(&self) -> bool {
            match self.state.mode {
                GameMode::GameClear => true,
                GameMode::GameOver => self.retries_left == 0,
                _ => false,
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Stage Runner (headless) starting...");

        let args = parse_args();
        let tuning = load_tuning(args.tuning.as_deref());
        let settings = load_settings(args.settings.as_deref());

        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut state = match GameState::with_tuning(seed, tuning) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("{} - using default tuning", e);
                GameState::new(seed)
            }
        };
        state.muted = settings.start_muted;
        log::info!("Game initialized with seed: {}", seed);

        // No image decoding here: every sprite settles as failed and draws as a fallback shape
        let mut assets = AssetTracker::new();
        for id in AssetId::ALL {
            assets.mark_failed(id);
        }

        let mut runner = Runner {
            state,
            audio: AudioManager::new(LogBackend, &settings),
            assets,
            settings,
            accumulator: 0.0,
            ticks: 0,
            retries_left: args.retries,
            stages_cleared: 0,
            kills: 0,
            items: 0,
        };

        let mut frames = 0u64;
        while runner.ticks < args.ticks && !runner.finished() {
            runner.update(FRAME_DT);
            frames += 1;
            if frames % RENDER_EVERY == 0 {
                let snap = Snapshot::capture(&runner.state);
                let frame = renderer::build_frame(&snap, &runner.assets, &runner.settings);
                log::debug!(
                    "frame {}: {} commands, {} fill vertices",
                    frames,
                    frame.commands.len(),
                    frame.fill_vertices().len()
                );
            }
        }

        let state = &runner.state;
        println!("seed:           {}", seed);
        println!("ticks:          {}", runner.ticks);
        println!("mode:           {:?}", state.mode);
        println!("stage:          {}/{}", state.stage.index(), stage_runner::consts::STAGE_COUNT);
        println!("score:          {}", state.score);
        println!("life:           {}", state.player.life);
        println!("stages cleared: {}", runner.stages_cleared);
        println!("enemies killed: {}", runner.kills);
        println!("items:          {}", runner.items);

        if args.json {
            match Snapshot::capture(state).to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => log::warn!("Snapshot serialization failed: {}", e),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts link the library directly; the runner is native only
}
