//! Rendering module
//!
//! The game draws through the [`Presenter`] trait so the simulation never
//! touches the DOM. [`draw_frame`] fixes the layer order; the browser backend
//! in `canvas` maps each call onto the Canvas 2D API.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod spline;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPresenter;
pub use spline::{BezierSegment, TrailCurve, catmull_rom};

use glam::Vec2;

use crate::sim::{EndOfRun, Field, FlashColor, GameState, PLAYER_GLYPH, ROCK_GLYPH};

/// Style constants
pub mod style {
    pub const BACKGROUND: &str = "#111";
    pub const GRID: &str = "#222";
    pub const TRAIL: &str = "rgba(148, 223, 17, 0.5)";
    pub const TRAIL_WIDTH: f64 = 2.0;
    pub const FLASH_ALPHA: f64 = 0.3;

    /// Glyph font sizes (px)
    pub const ROCK_FONT_PX: f32 = 30.0;
    pub const PLAYER_FONT_PX: f32 = 32.0;
    pub const PLANET_FONT_PX: f32 = 70.0;

    /// Minimum grid spacing and the width divisor used above it
    pub const MIN_GRID: f32 = 30.0;
    pub const GRID_DIVISIONS: f32 = 20.0;
}

/// Glyph fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Leave the context's current fill
    Default,
    White,
    Yellow,
}

impl Tint {
    pub fn css(&self) -> Option<&'static str> {
        match self {
            Tint::Default => None,
            Tint::White => Some("white"),
            Tint::Yellow => Some("yellow"),
        }
    }
}

/// A glyph placed on the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub glyph: &'static str,
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
    pub scale: f32,
    pub font_px: f32,
    pub tint: Tint,
}

/// Everything the frame loop needs from a display backend
pub trait Presenter {
    /// Fill the background and draw grid lines every `grid_size` units
    fn clear_and_draw_background(&mut self, field: Field, grid_size: f32);
    /// Stroke the smoothed player path
    fn draw_trail(&mut self, curve: &TrailCurve);
    fn draw_entity(&mut self, sprite: &Sprite);
    /// Translucent full-field wash
    fn draw_flash(&mut self, field: Field, color: FlashColor);
    fn refresh_score_and_timer(&mut self, score: u32, time_secs: u32);
    fn show_end_of_run(&mut self, summary: &EndOfRun);
    fn hide_end_of_run(&mut self);
}

/// Grid spacing for a field: `max(30, floor(width / 20))`
pub fn grid_size(field: Field) -> f32 {
    (field.width / style::GRID_DIVISIONS).floor().max(style::MIN_GRID)
}

/// Grid line offsets in `[0, extent)`
pub fn grid_offsets(extent: f32, size: f32) -> impl Iterator<Item = f32> {
    let count = if size > 0.0 { (extent / size).ceil().max(0.0) as usize } else { 0 };
    (0..count).map(move |i| i as f32 * size).filter(move |&o| o < extent)
}

/// Draw one frame in layer order: background, trail, rocks, player, planet, flash
pub fn draw_frame(state: &GameState, tension: f32, presenter: &mut impl Presenter) {
    let field = state.field;
    presenter.clear_and_draw_background(field, grid_size(field));

    if let Some(curve) = catmull_rom(&state.path, tension) {
        presenter.draw_trail(&curve);
    }

    for rock in &state.rocks {
        presenter.draw_entity(&Sprite {
            glyph: ROCK_GLYPH,
            pos: rock.pos,
            rotation: rock.rotation,
            scale: rock.scale,
            font_px: style::ROCK_FONT_PX,
            tint: Tint::Default,
        });
    }

    presenter.draw_entity(&Sprite {
        glyph: PLAYER_GLYPH,
        pos: state.player.pos,
        rotation: 0.0,
        scale: 1.0,
        font_px: style::PLAYER_FONT_PX,
        tint: Tint::White,
    });

    let planet = state.current_planet();
    presenter.draw_entity(&Sprite {
        glyph: planet.glyph,
        pos: planet.pos,
        rotation: planet.rotation,
        scale: 1.0,
        font_px: style::PLANET_FONT_PX,
        tint: if planet.reached { Tint::Yellow } else { Tint::White },
    });

    if let Some(flash) = state.flash.filter(|f| f.frames > 0) {
        presenter.draw_flash(field, flash.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::{Flash, Rock};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[derive(Debug, PartialEq)]
    enum Call {
        Background(f32),
        Trail(usize),
        Entity(&'static str, Tint),
        Flash,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Presenter for Recorder {
        fn clear_and_draw_background(&mut self, _field: Field, grid_size: f32) {
            self.calls.push(Call::Background(grid_size));
        }
        fn draw_trail(&mut self, curve: &TrailCurve) {
            self.calls.push(Call::Trail(curve.segments.len()));
        }
        fn draw_entity(&mut self, sprite: &Sprite) {
            self.calls.push(Call::Entity(sprite.glyph, sprite.tint));
        }
        fn draw_flash(&mut self, _field: Field, _color: FlashColor) {
            self.calls.push(Call::Flash);
        }
        fn refresh_score_and_timer(&mut self, _score: u32, _time_secs: u32) {}
        fn show_end_of_run(&mut self, _summary: &EndOfRun) {}
        fn hide_end_of_run(&mut self) {}
    }

    fn new_state() -> GameState {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut state = GameState::new(Field::new(800.0, 600.0), &GameConfig::default(), &mut rng);
        state.start_level(&mut rng);
        state
    }

    #[test]
    fn test_grid_size() {
        assert_eq!(grid_size(Field::new(800.0, 600.0)), 40.0);
        assert_eq!(grid_size(Field::new(410.0, 300.0)), 30.0);
        assert_eq!(grid_size(Field::new(1010.0, 757.0)), 50.0);
    }

    #[test]
    fn test_grid_offsets() {
        let offsets: Vec<f32> = grid_offsets(100.0, 40.0).collect();
        assert_eq!(offsets, vec![0.0, 40.0, 80.0]);
        let offsets: Vec<f32> = grid_offsets(120.0, 40.0).collect();
        assert_eq!(offsets, vec![0.0, 40.0, 80.0]);
        assert_eq!(grid_offsets(100.0, 0.0).count(), 0);
    }

    #[test]
    fn test_layer_order() {
        let mut state = new_state();
        state.path = vec![Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0), Vec2::new(3.0, 1.0)];
        state.rocks.push(Rock::new(Vec2::new(500.0, 200.0), 2.0, 0.0, 0.0, 1.5));

        let mut recorder = Recorder::default();
        draw_frame(&state, 0.5, &mut recorder);
        assert_eq!(
            recorder.calls,
            vec![
                Call::Background(40.0),
                Call::Trail(2),
                Call::Entity(ROCK_GLYPH, Tint::Default),
                Call::Entity(PLAYER_GLYPH, Tint::White),
                Call::Entity("🪐", Tint::White),
            ]
        );
    }

    #[test]
    fn test_short_path_has_no_trail_and_flash_shows() {
        let mut state = new_state();
        state.path = vec![Vec2::new(1.0, 1.0)];
        state.planets[0].reached = true;
        state.flash = Some(Flash::new(FlashColor::Green));

        let mut recorder = Recorder::default();
        draw_frame(&state, 0.5, &mut recorder);
        assert!(!recorder.calls.iter().any(|c| matches!(c, Call::Trail(_))));
        assert_eq!(recorder.calls[2], Call::Entity("🪐", Tint::Yellow));
        assert_eq!(recorder.calls.last(), Some(&Call::Flash));
    }
}
