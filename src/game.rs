//! Frame loop
//!
//! [`Game`] owns the simulation state, its RNG and the two interval clocks
//! (elapsed seconds, rock spawns). The host calls [`Game::frame`] once per
//! animation frame with the frame timestamp; each call advances the clocks,
//! runs one simulation tick, then draws and refreshes the HUD.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::MAX_FRAME_MS;
use crate::renderer::{Presenter, draw_frame};
use crate::settings::GameConfig;
use crate::sim::{EndOfRun, Field, GameState, Interval, LevelOutcome, NextAction, TickInput, tick};

pub struct Game {
    config: GameConfig,
    state: GameState,
    rng: Pcg32,
    /// Adds one second to the level timer per period
    clock: Interval,
    /// Spawns one rock per period
    spawner: Interval,
    last_time: Option<f64>,
    /// Set while the end-of-run panel is up
    end_of_run: Option<EndOfRun>,
}

impl Game {
    /// Create a game on level 1 and start it
    pub fn new(config: GameConfig, field: Field, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(field, &config, &mut rng);
        let mut game = Self {
            clock: Interval::new(config.clock_interval_ms),
            spawner: Interval::new(config.spawn_interval_ms),
            config,
            state,
            rng,
            last_time: None,
            end_of_run: None,
        };
        game.start_level();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The last level's summary, while it is on screen
    pub fn end_of_run(&self) -> Option<&EndOfRun> {
        self.end_of_run.as_ref()
    }

    /// What the end-of-run button should do right now
    pub fn pending_action(&self) -> Option<NextAction> {
        self.end_of_run.as_ref().map(|summary| summary.next_action)
    }

    /// Whether the clock and spawner are running
    pub fn timers_active(&self) -> bool {
        self.clock.is_active() || self.spawner.is_active()
    }

    /// Adopt a new field size (canvas resize)
    pub fn resize(&mut self, field: Field) {
        log::info!("Field resized to {:.0}x{:.0}", field.width, field.height);
        self.state.resize(field, &mut self.rng);
    }

    /// Run one animation frame at host timestamp `now_ms`.
    ///
    /// Returns the level outcome on the frame the level ends.
    pub fn frame(
        &mut self,
        now_ms: f64,
        input: &TickInput,
        presenter: &mut impl Presenter,
    ) -> Option<LevelOutcome> {
        let dt_ms = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_time = Some(now_ms);

        self.advance_timers(dt_ms);
        let outcome = self.update(input);
        if outcome.is_some() {
            if let Some(summary) = &self.end_of_run {
                presenter.show_end_of_run(summary);
            }
        }

        draw_frame(&self.state, self.config.trail_tension, presenter);
        presenter.refresh_score_and_timer(self.state.score(), self.state.time_secs);
        self.decay_flash();

        outcome
    }

    /// Fire any clock and spawner periods that elapsed
    pub fn advance_timers(&mut self, dt_ms: f64) {
        for _ in 0..self.clock.advance(dt_ms) {
            if !self.state.phase.is_over() {
                self.state.time_secs += 1;
            }
        }
        for _ in 0..self.spawner.advance(dt_ms) {
            if !self.state.phase.is_over() {
                self.state.spawn_rock(&self.config, &mut self.rng);
            }
        }
    }

    /// One simulation tick; ends the level if it produced an outcome
    pub fn update(&mut self, input: &TickInput) -> Option<LevelOutcome> {
        let outcome = tick(&mut self.state, input, &self.config, &mut self.rng)?;
        self.end_level(outcome);
        Some(outcome)
    }

    /// Carry out the end-of-run button's action
    pub fn apply(&mut self, action: NextAction, presenter: &mut impl Presenter) {
        presenter.hide_end_of_run();
        match action {
            NextAction::AdvanceLevel => self.advance_level(),
            NextAction::Restart => self.reset(),
        }
    }

    /// Next level, keeping reached planets
    pub fn advance_level(&mut self) {
        self.state.advance_level(&mut self.rng);
        self.rearm();
    }

    /// Back to level 1 with nothing reached
    pub fn reset(&mut self) {
        self.state.reset(&mut self.rng);
        self.rearm();
    }

    fn start_level(&mut self) {
        self.state.start_level(&mut self.rng);
        self.rearm();
    }

    fn rearm(&mut self) {
        self.end_of_run = None;
        self.clock.arm();
        self.spawner.arm();
    }

    fn end_level(&mut self, outcome: LevelOutcome) {
        self.clock.cancel();
        self.spawner.cancel();

        let summary = EndOfRun::from_state(&self.state, outcome);
        log::info!(
            "Level {} ended: {} (score {}, {}s)",
            summary.level,
            summary.result_text(),
            summary.score,
            summary.time_secs
        );
        if let Ok(json) = serde_json::to_string(&summary) {
            log::debug!("End of run: {}", json);
        }
        self.end_of_run = Some(summary);
    }

    fn decay_flash(&mut self) {
        if let Some(flash) = &mut self.state.flash {
            flash.frames = flash.frames.saturating_sub(1);
            if flash.frames == 0 {
                self.state.flash = None;
            }
        }
    }
}
