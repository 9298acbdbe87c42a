//! Canvas 2D + DOM presenter (WASM only)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use super::{Presenter, Sprite, TrailCurve, grid_offsets, style};
use crate::sim::{EndOfRun, Field, FlashColor};

/// DOM ids the presenter writes to
mod ids {
    pub const SCORE: &str = "score";
    pub const TIMER: &str = "timer";
    pub const END_SCREEN: &str = "end-screen";
    pub const RESULT: &str = "result";
    pub const FINAL_SCORE: &str = "final-score";
    pub const FINAL_TIME: &str = "final-time";
    pub const MAP: &str = "map";
    pub const RESTART: &str = "restart";
}

pub struct CanvasPresenter {
    ctx: CanvasRenderingContext2d,
    document: Document,
}

impl CanvasPresenter {
    pub fn new(canvas: &HtmlCanvasElement, document: Document) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, document })
    }

    fn set_text(&self, id: &str, text: &str) {
        match self.document.get_element_by_id(id) {
            Some(el) => el.set_text_content(Some(text)),
            None => log::warn!("Missing #{} element", id),
        }
    }

    fn set_display(&self, id: &str, display: &str) {
        let el = self
            .document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        match el {
            Some(el) => {
                let _ = el.style().set_property("display", display);
            }
            None => log::warn!("Missing #{} element", id),
        }
    }

    fn fill_planet_list(&self, summary: &EndOfRun) -> Result<(), JsValue> {
        let Some(map) = self.document.get_element_by_id(ids::MAP) else {
            log::warn!("Missing #{} element", ids::MAP);
            return Ok(());
        };
        map.set_inner_html("");
        for status in &summary.planets {
            let line = self.document.create_element("p")?;
            line.set_text_content(Some(&status.to_string()));
            map.append_child(&line)?;
        }
        Ok(())
    }

    fn draw_sprite(&self, sprite: &Sprite) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(sprite.pos.x as f64, sprite.pos.y as f64)?;
        ctx.rotate((sprite.rotation as f64).to_radians())?;
        ctx.scale(sprite.scale as f64, sprite.scale as f64)?;
        ctx.set_font(&format!("{}px Arial", sprite.font_px));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        if let Some(color) = sprite.tint.css() {
            ctx.set_fill_style_str(color);
        }
        ctx.fill_text(sprite.glyph, 0.0, 0.0)?;
        ctx.restore();
        Ok(())
    }
}

impl Presenter for CanvasPresenter {
    fn clear_and_draw_background(&mut self, field: Field, grid_size: f32) {
        let ctx = &self.ctx;
        let (w, h) = (field.width as f64, field.height as f64);

        ctx.set_fill_style_str(style::BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_stroke_style_str(style::GRID);
        ctx.set_line_width(1.0);
        for x in grid_offsets(field.width, grid_size) {
            ctx.begin_path();
            ctx.move_to(x as f64, 0.0);
            ctx.line_to(x as f64, h);
            ctx.stroke();
        }
        for y in grid_offsets(field.height, grid_size) {
            ctx.begin_path();
            ctx.move_to(0.0, y as f64);
            ctx.line_to(w, y as f64);
            ctx.stroke();
        }
    }

    fn draw_trail(&mut self, curve: &TrailCurve) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_stroke_style_str(style::TRAIL);
        ctx.set_line_width(style::TRAIL_WIDTH);
        ctx.begin_path();
        ctx.move_to(curve.start.x as f64, curve.start.y as f64);
        for seg in &curve.segments {
            ctx.bezier_curve_to(
                seg.c1.x as f64,
                seg.c1.y as f64,
                seg.c2.x as f64,
                seg.c2.y as f64,
                seg.end.x as f64,
                seg.end.y as f64,
            );
        }
        ctx.stroke();
        ctx.restore();
    }

    fn draw_entity(&mut self, sprite: &Sprite) {
        if let Err(e) = self.draw_sprite(sprite) {
            // Keep the save/restore stack balanced if a transform call threw
            self.ctx.restore();
            log::warn!("Failed to draw {}: {:?}", sprite.glyph, e);
        }
    }

    fn draw_flash(&mut self, field: Field, color: FlashColor) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color.css());
        ctx.set_global_alpha(style::FLASH_ALPHA);
        ctx.fill_rect(0.0, 0.0, field.width as f64, field.height as f64);
        ctx.set_global_alpha(1.0);
    }

    fn refresh_score_and_timer(&mut self, score: u32, time_secs: u32) {
        self.set_text(ids::SCORE, &score.to_string());
        self.set_text(ids::TIMER, &time_secs.to_string());
    }

    fn show_end_of_run(&mut self, summary: &EndOfRun) {
        self.set_display(ids::END_SCREEN, "block");
        self.set_text(ids::RESULT, summary.result_text());
        self.set_text(ids::FINAL_SCORE, &summary.score.to_string());
        self.set_text(ids::FINAL_TIME, &summary.time_secs.to_string());
        if !summary.planets.is_empty() {
            if let Err(e) = self.fill_planet_list(summary) {
                log::warn!("Failed to build planet list: {:?}", e);
            }
        }
        self.set_text(ids::RESTART, summary.next_action.label());
    }

    fn hide_end_of_run(&mut self) {
        self.set_display(ids::END_SCREEN, "none");
    }
}
