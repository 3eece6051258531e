//! Browser 2D canvas surface

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{BORDER_WIDTH, Frame, RenderSurface};

/// Draws frames onto an HTML canvas
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn draw(&self, frame: &Frame) -> Result<(), JsValue> {
        let (w, h) = (frame.canvas.0 as f64, frame.canvas.1 as f64);
        let ctx = &self.ctx;

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(&frame.background.to_hex());
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_line_width(BORDER_WIDTH as f64);
        for sprite in &frame.sprites {
            ctx.begin_path();
            ctx.arc(
                sprite.pos.x as f64,
                sprite.pos.y as f64,
                sprite.radius as f64,
                0.0,
                TAU,
            )?;
            ctx.set_fill_style_str(&sprite.fill.to_hex());
            ctx.fill();
            ctx.set_stroke_style_str(&sprite.border.to_hex());
            ctx.stroke();
        }

        ctx.set_font("10px Mono");
        ctx.set_fill_style_str("black");
        let mut y = 0.0;
        for line in frame.hud_text() {
            y += 15.0;
            ctx.fill_text(&line, 5.0, y)?;
        }

        if let Some(banner) = &frame.banner {
            let x = w / 2.0 - 60.0;
            let y = h / 8.0;
            ctx.set_font("30px Mono bold");
            ctx.set_fill_style_str("red");
            ctx.fill_text(&banner.title, x, y)?;
            ctx.set_font("20px Mono bold");
            ctx.set_fill_style_str("black");
            ctx.fill_text(&format!("score: {}", banner.score), x, y + 25.0)?;
        }
        Ok(())
    }
}

impl RenderSurface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn present(&mut self, frame: &Frame) {
        if let Err(e) = self.draw(frame) {
            log::warn!("Draw failed: {:?}", e);
        }
    }
}
