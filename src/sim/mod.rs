//! Simulation module
//!
//! All gameplay logic lives here:
//! - Per-frame kinematics (speeds are per display frame)
//! - Circle collisions and the level state machine
//! - Interval clocks for elapsed time and rock spawning
//! - No rendering or platform dependencies

pub mod collision;
pub mod schedule;
pub mod state;
pub mod summary;
pub mod tick;

pub use collision::{circles_overlap, first_rock_hit, reached_planet};
pub use schedule::Interval;
pub use state::{
    Field, Flash, FlashColor, GamePhase, GameState, LevelOutcome, PLANET_DEFS, PLAYER_GLYPH,
    Planet, PlanetDef, Player, ROCK_GLYPH, Rock,
};
pub use summary::{EndOfRun, NextAction, PlanetStatus};
pub use tick::{TickInput, tick, update_planet, update_player, update_rocks};
