//! Planet Dash - dodge the rocks, reach the planet
//!
//! Core modules:
//! - `sim`: Simulation (kinematics, collisions, level state machine)
//! - `game`: Frame loop that owns the simulation and drives the presenter
//! - `renderer`: Presentation interface, trail spline and Canvas 2D backend
//! - `platform`: Browser input and viewport helpers
//! - `settings`: Input profiles and tunables

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::Game;
pub use settings::{GameConfig, InputProfile};

/// Game configuration constants
pub mod consts {
    /// Number of levels (one planet each)
    pub const LEVEL_COUNT: u32 = 4;

    /// Player size/speed as a fraction of field width
    pub const PLAYER_RADIUS_FRAC: f32 = 0.04;
    pub const PLAYER_SPEED_FRAC: f32 = 0.003;
    /// Player start position as a fraction of field width
    pub const PLAYER_START_X_FRAC: f32 = 0.1;

    /// Planet home position (x fraction, y fraction range)
    pub const PLANET_HOME_X_FRAC: f32 = 0.8;
    pub const PLANET_HOME_Y_MIN_FRAC: f32 = 0.2;
    pub const PLANET_HOME_Y_SPAN_FRAC: f32 = 0.6;
    /// Inset margin for planet wander points
    pub const PLANET_MARGIN: f32 = 50.0;
    /// Frames between wander-point picks: [MIN, MIN + SPAN)
    pub const RETARGET_MIN_FRAMES: f32 = 100.0;
    pub const RETARGET_SPAN_FRAMES: f32 = 400.0;

    /// Rock collision radius before scaling
    pub const ROCK_BASE_RADIUS: f32 = 15.0;
    /// Rocks at or past this x are culled
    pub const ROCK_DESPAWN_X: f32 = -20.0;
    /// Max rock rotation speed either way (degrees/frame)
    pub const ROCK_SPIN_RANGE: f32 = 7.0;

    /// Score before path penalty
    pub const SCORE_BASE: u32 = 1000;

    /// Frames the win flash stays on screen
    pub const FLASH_FRAMES: u32 = 10;

    /// Largest frame delta fed to the interval clocks (ms)
    pub const MAX_FRAME_MS: f64 = 1000.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    (angle % 360.0 + 360.0) % 360.0
}

/// Final score for a path of the given length
#[inline]
pub fn score_for_path(path_len: usize) -> u32 {
    let len = u32::try_from(path_len).unwrap_or(u32::MAX);
    consts::SCORE_BASE.saturating_sub(len)
}
