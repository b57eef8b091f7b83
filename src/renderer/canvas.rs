use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::GRID_SIZE;
use crate::sim::{EntityView, RenderSnapshot};

const BACKGROUND: &str = "#F2F4F7";
const GRID_COLOR: &str = "#D9DDE3";
const BORDER_COLOR: &str = "#9AA3AE";
const LABEL_COLOR: &str = "#FFFFFF";
const LABEL_OUTLINE: &str = "#1B1F24";

/// Owns the 2D context of the game canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the element's CSS size; returns the new size
    pub fn fit_to_client(&self) -> (f32, f32) {
        let w = self.canvas.client_width().max(1) as u32;
        let h = self.canvas.client_height().max(1) as u32;
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            log::debug!("Canvas resized to {}x{}", w, h);
        }
        (w as f32, h as f32)
    }

    pub fn draw(&self, snap: &RenderSnapshot<'_>) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.save();
        ctx.translate(-snap.camera.x as f64, -snap.camera.y as f64)?;

        self.draw_grid(snap, w, h);

        for food in &snap.food {
            self.draw_circle(food)?;
        }
        for bot in &snap.bots {
            self.draw_circle(bot)?;
            self.draw_label(bot)?;
        }
        self.draw_circle(&snap.player)?;
        self.draw_label(&snap.player)?;

        ctx.restore();
        Ok(())
    }

    /// Grid lines over the visible part of the world, plus the world border
    fn draw_grid(&self, snap: &RenderSnapshot<'_>, w: f64, h: f64) {
        let ctx = &self.ctx;
        let world = snap.world_size as f64;
        let step = GRID_SIZE as f64;
        let (cx, cy) = (snap.camera.x as f64, snap.camera.y as f64);

        ctx.set_stroke_style_str(GRID_COLOR);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        let mut x = (cx / step).floor() * step;
        while x <= (cx + w).min(world) {
            ctx.move_to(x, cy.max(0.0));
            ctx.line_to(x, (cy + h).min(world));
            x += step;
        }
        let mut y = (cy / step).floor() * step;
        while y <= (cy + h).min(world) {
            ctx.move_to(cx.max(0.0), y);
            ctx.line_to((cx + w).min(world), y);
            y += step;
        }
        ctx.stroke();

        ctx.set_stroke_style_str(BORDER_COLOR);
        ctx.set_line_width(4.0);
        ctx.stroke_rect(0.0, 0.0, world, world);
    }

    fn draw_circle(&self, e: &EntityView<'_>) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.arc(e.pos.x as f64, e.pos.y as f64, e.radius as f64, 0.0, TAU)?;
        ctx.set_fill_style_str(e.color);
        ctx.fill();
        Ok(())
    }

    fn draw_label(&self, e: &EntityView<'_>) -> Result<(), JsValue> {
        if e.name.is_empty() {
            return Ok(());
        }
        let ctx = &self.ctx;
        let font_px = (e.radius * 0.4).clamp(10.0, 48.0);
        ctx.set_font(&format!("bold {}px sans-serif", font_px.round()));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_line_width(3.0);
        ctx.set_stroke_style_str(LABEL_OUTLINE);
        ctx.stroke_text(e.name, e.pos.x as f64, e.pos.y as f64)?;
        ctx.set_fill_style_str(LABEL_COLOR);
        ctx.fill_text(e.name, e.pos.x as f64, e.pos.y as f64)
    }
}
