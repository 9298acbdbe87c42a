//! Platform abstraction layer
//!
//! Browser-facing helpers that do not need a DOM to test:
//! - Input: held keys and touch buttons → per-frame directions
//! - Viewport: canvas sizing and mobile detection

pub mod input;
pub mod viewport;

pub use input::{Direction, InputState};
pub use viewport::{fit_field, is_mobile, profile_for};
