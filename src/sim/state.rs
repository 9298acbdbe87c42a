//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]. Kinematic speeds
//! are per frame, not per second, so one call to `tick` is one display frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::score_for_path;
use crate::settings::GameConfig;

pub const PLAYER_GLYPH: &str = "🛸";
pub const ROCK_GLYPH: &str = "🪨";

/// Where the current level stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Planet reached; waiting for the player to continue
    LevelWon,
    /// Hit a rock
    LevelLost,
}

impl GamePhase {
    /// True once the level has ended either way
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Terminal result of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOutcome {
    Won,
    Lost,
}

impl LevelOutcome {
    pub fn phase(&self) -> GamePhase {
        match self {
            LevelOutcome::Won => GamePhase::LevelWon,
            LevelOutcome::Lost => GamePhase::LevelLost,
        }
    }

    pub fn result_text(&self) -> &'static str {
        match self {
            LevelOutcome::Won => "Level Complete!",
            LevelOutcome::Lost => "Game Over",
        }
    }
}

/// Play area bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Units moved per frame along each held axis
    pub speed: f32,
}

impl Player {
    pub fn new(field: Field) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            radius: 0.0,
            speed: 0.0,
        };
        player.fit_to(field);
        player.reset(field);
        player
    }

    /// Rescale size and speed to the field width
    pub fn fit_to(&mut self, field: Field) {
        self.radius = field.width * PLAYER_RADIUS_FRAC;
        self.speed = field.width * PLAYER_SPEED_FRAC;
    }

    /// Move to the level start position
    pub fn reset(&mut self, field: Field) {
        self.pos = Vec2::new(field.width * PLAYER_START_X_FRAC, field.height / 2.0);
    }

    /// Keep the whole sprite inside the field
    pub fn clamp_to(&mut self, field: Field) {
        self.pos.x = self.pos.x.min(field.width - self.radius).max(self.radius);
        self.pos.y = self.pos.y.min(field.height - self.radius).max(self.radius);
    }
}

/// Fixed per-level planet definition
#[derive(Debug, Clone, Copy)]
pub struct PlanetDef {
    pub glyph: &'static str,
    /// Degrees per frame
    pub rotation_speed: f32,
}

/// Planets in level order
pub const PLANET_DEFS: [PlanetDef; LEVEL_COUNT as usize] = [
    PlanetDef {
        glyph: "🪐",
        rotation_speed: 0.1,
    },
    PlanetDef {
        glyph: "🌍",
        rotation_speed: 0.5,
    },
    PlanetDef {
        glyph: "🌑",
        rotation_speed: 1.0,
    },
    PlanetDef {
        glyph: "☄️",
        rotation_speed: 1.5,
    },
];

/// A level's wandering goal
#[derive(Debug, Clone, Serialize)]
pub struct Planet {
    pub glyph: &'static str,
    /// Position the planet returns to at level start
    pub home: Vec2,
    pub pos: Vec2,
    /// Degrees, in [0, 360)
    pub rotation: f32,
    pub rotation_speed: f32,
    pub move_speed: f32,
    /// Current wander point
    pub target: Vec2,
    /// Frames until a new wander point is picked
    pub retarget_timer: f32,
    /// Persists across levels for the end-of-run summary
    pub reached: bool,
}

impl Planet {
    pub fn new(def: &PlanetDef, move_speed: f32) -> Self {
        Self {
            glyph: def.glyph,
            home: Vec2::ZERO,
            pos: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: def.rotation_speed,
            move_speed,
            target: Vec2::ZERO,
            retarget_timer: 0.0,
            reached: false,
        }
    }

    /// Pick a uniform wander point inside the inset margin and restart the countdown
    pub fn pick_target(&mut self, field: Field, rng: &mut impl Rng) {
        self.target = Vec2::new(
            PLANET_MARGIN + rng.random::<f32>() * (field.width - 2.0 * PLANET_MARGIN),
            PLANET_MARGIN + rng.random::<f32>() * (field.height - 2.0 * PLANET_MARGIN),
        );
        self.retarget_timer = RETARGET_MIN_FRAMES + rng.random::<f32>() * RETARGET_SPAN_FRAMES;
        log::debug!(
            "Planet {} wanders to ({:.0}, {:.0}) for {:.0} frames",
            self.glyph,
            self.target.x,
            self.target.y,
            self.retarget_timer
        );
    }

    /// Re-roll the home position for a resized field
    pub fn rehome(&mut self, field: Field, rng: &mut impl Rng) {
        self.home = Vec2::new(
            field.width * PLANET_HOME_X_FRAC,
            field.height * (PLANET_HOME_Y_MIN_FRAC + rng.random::<f32>() * PLANET_HOME_Y_SPAN_FRAC),
        );
    }

    /// Back to home, unrotated, with a fresh wander point
    pub fn reset(&mut self, field: Field, rng: &mut impl Rng) {
        self.pos = self.home;
        self.rotation = 0.0;
        self.pick_target(field, rng);
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub pos: Vec2,
    /// Leftward units per frame
    pub speed: f32,
    /// Degrees, in [0, 360)
    pub rotation: f32,
    pub rotation_speed: f32,
    pub scale: f32,
    pub radius: f32,
}

impl Rock {
    pub fn new(pos: Vec2, speed: f32, rotation: f32, rotation_speed: f32, scale: f32) -> Self {
        Self {
            pos,
            speed,
            rotation,
            rotation_speed,
            scale,
            radius: ROCK_BASE_RADIUS * scale,
        }
    }
}

/// Full-screen color wash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashColor {
    Green,
}

impl FlashColor {
    pub fn css(&self) -> &'static str {
        match self {
            FlashColor::Green => "green",
        }
    }
}

/// Active flash overlay (counts down once per rendered frame)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Flash {
    pub color: FlashColor,
    pub frames: u32,
}

impl Flash {
    pub fn new(color: FlashColor) -> Self {
        Self {
            color,
            frames: FLASH_FRAMES,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub field: Field,
    /// Current level (1-based)
    pub level: u32,
    /// Whole seconds elapsed this level
    pub time_secs: u32,
    pub phase: GamePhase,
    pub player: Player,
    /// Recorded player positions this level (deduplicated)
    pub path: Vec<Vec2>,
    /// One planet per level; only `level - 1` is live
    pub planets: Vec<Planet>,
    /// Levels whose planet was reached, in order
    pub planets_reached: Vec<u32>,
    pub rocks: Vec<Rock>,
    pub flash: Option<Flash>,
}

impl GameState {
    /// Create a state at level 1; call [`GameState::start_level`] before ticking
    pub fn new(field: Field, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let planets = PLANET_DEFS
            .iter()
            .zip(config.planet_move_speeds)
            .map(|(def, speed)| Planet::new(def, speed))
            .collect();

        let mut state = Self {
            field,
            level: 1,
            time_secs: 0,
            phase: GamePhase::Playing,
            player: Player::new(field),
            path: Vec::new(),
            planets,
            planets_reached: Vec::new(),
            rocks: Vec::new(),
            flash: None,
        };
        state.resize(field, rng);
        state
    }

    /// Score for the current path
    pub fn score(&self) -> u32 {
        score_for_path(self.path.len())
    }

    /// The planet for the current level
    pub fn current_planet(&self) -> &Planet {
        &self.planets[self.planet_index()]
    }

    pub fn current_planet_mut(&mut self) -> &mut Planet {
        let index = self.planet_index();
        &mut self.planets[index]
    }

    fn planet_index(&self) -> usize {
        (self.level.clamp(1, LEVEL_COUNT) - 1) as usize
    }

    /// Whether another level follows this one
    pub fn has_next_level(&self) -> bool {
        self.level < LEVEL_COUNT
    }

    /// Adopt new field bounds: rescale the player and re-roll planet homes
    pub fn resize(&mut self, field: Field, rng: &mut impl Rng) {
        self.field = field;
        self.player.fit_to(field);
        self.player.clamp_to(field);
        for planet in &mut self.planets {
            planet.rehome(field, rng);
        }
    }

    /// Reset per-level state and enter `Playing`
    pub fn start_level(&mut self, rng: &mut impl Rng) {
        let field = self.field;
        self.player.reset(field);
        self.path.clear();
        self.time_secs = 0;
        self.rocks.clear();
        self.phase = GamePhase::Playing;
        self.flash = None;
        self.current_planet_mut().reset(field, rng);
        log::info!("Level {} started", self.level);
    }

    /// Move on to the next level (no-op past the last one)
    pub fn advance_level(&mut self, rng: &mut impl Rng) {
        if self.has_next_level() {
            self.level += 1;
        }
        self.start_level(rng);
    }

    /// Back to level 1 with no planets reached
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.level = 1;
        self.planets_reached.clear();
        for planet in &mut self.planets {
            planet.reached = false;
        }
        log::info!("Game reset");
        self.start_level(rng);
    }

    /// Spawn one rock at the right edge
    pub fn spawn_rock(&mut self, config: &GameConfig, rng: &mut impl Rng) {
        let (scale_min, scale_max) = config.rock_scale_range;
        let (speed_min, speed_max) = config.rock_speed_range;

        let scale = scale_min + rng.random::<f32>() * (scale_max - scale_min);
        let pos = Vec2::new(self.field.width, rng.random::<f32>() * self.field.height);
        let speed = speed_min + rng.random::<f32>() * (speed_max - speed_min);
        let rotation = rng.random::<f32>() * 360.0;
        let rotation_speed = (rng.random::<f32>() - 0.5) * ROCK_SPIN_RANGE;

        let rock = Rock::new(pos, speed, rotation, rotation_speed, scale);
        log::debug!(
            "Rock spawned at y={:.0} speed={:.2} radius={:.1}",
            rock.pos.y,
            rock.speed,
            rock.radius
        );
        self.rocks.push(rock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn new_state() -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = GameState::new(Field::new(800.0, 600.0), &GameConfig::default(), &mut rng);
        state.start_level(&mut rng);
        (state, rng)
    }

    #[test]
    fn test_player_scales_with_field() {
        let (state, _) = new_state();
        assert_eq!(state.player.radius, 32.0);
        assert!((state.player.speed - 2.4).abs() < 1e-5);
        assert_eq!(state.player.pos, Vec2::new(80.0, 300.0));
    }

    #[test]
    fn test_shrink_pulls_player_inside() {
        let (mut state, mut rng) = new_state();
        state.player.pos = Vec2::new(760.0, 560.0);
        state.resize(Field::new(400.0, 300.0), &mut rng);
        assert_eq!(state.player.radius, 16.0);
        assert_eq!(state.player.pos, Vec2::new(384.0, 284.0));
    }

    #[test]
    fn test_planet_homes_within_band() {
        let (state, _) = new_state();
        for planet in &state.planets {
            assert_eq!(planet.home.x, 640.0);
            assert!(planet.home.y >= 120.0 && planet.home.y <= 480.0);
        }
        assert_eq!(state.current_planet().pos, state.current_planet().home);
    }

    #[test]
    fn test_pick_target_inside_margin() {
        let (mut state, mut rng) = new_state();
        let field = state.field;
        for _ in 0..200 {
            let planet = state.current_planet_mut();
            planet.pick_target(field, &mut rng);
            assert!(planet.target.x >= 50.0 && planet.target.x <= 750.0);
            assert!(planet.target.y >= 50.0 && planet.target.y <= 550.0);
            assert!(planet.retarget_timer >= 100.0 && planet.retarget_timer <= 500.0);
        }
    }

    #[test]
    fn test_spawn_rock_ranges() {
        let (mut state, mut rng) = new_state();
        let config = GameConfig::default();
        for _ in 0..100 {
            state.spawn_rock(&config, &mut rng);
        }
        for rock in &state.rocks {
            assert_eq!(rock.pos.x, 800.0);
            assert!(rock.pos.y >= 0.0 && rock.pos.y <= 600.0);
            assert!(rock.speed >= 1.0 && rock.speed <= 8.0);
            assert!(rock.scale >= 1.0 && rock.scale <= 2.0);
            assert_eq!(rock.radius, 15.0 * rock.scale);
            assert!(rock.rotation_speed.abs() <= 3.5);
        }
    }

    #[test]
    fn test_start_level_clears_transient_state() {
        let (mut state, mut rng) = new_state();
        state.path.push(Vec2::new(1.0, 1.0));
        state.time_secs = 12;
        state.spawn_rock(&GameConfig::default(), &mut rng);
        state.phase = GamePhase::LevelLost;
        state.flash = Some(Flash::new(FlashColor::Green));

        state.start_level(&mut rng);
        assert!(state.path.is_empty());
        assert_eq!(state.time_secs, 0);
        assert!(state.rocks.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.flash.is_none());
        assert_eq!(state.score(), 1000);
    }

    #[test]
    fn test_advance_level_stops_at_last() {
        let (mut state, mut rng) = new_state();
        for _ in 0..10 {
            state.advance_level(&mut rng);
        }
        assert_eq!(state.level, LEVEL_COUNT);
        assert!(!state.has_next_level());
        assert_eq!(state.current_planet().glyph, "☄️");
    }
}
