//! Canvas 2D renderer

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::palette;
use crate::consts::{GROUND_Y, WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::{Rect, Snapshot};

/// Draws snapshots onto a `<canvas>`
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Physical pixels per logical unit
    scale: f64,
    base_speed: f32,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, base_speed: f32) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut renderer = Self {
            canvas,
            ctx,
            scale: 1.0,
            base_speed,
        };
        renderer.resize();
        Ok(renderer)
    }

    /// Match the backing store to the device pixel ratio
    pub fn resize(&mut self) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .filter(|r| *r > 0.0)
            .unwrap_or(1.0);
        self.scale = dpr;
        self.canvas.set_width((WORLD_WIDTH as f64 * dpr).round() as u32);
        self.canvas.set_height((WORLD_HEIGHT as f64 * dpr).round() as u32);
        log::info!("Canvas resized (dpr {})", dpr);
    }

    pub fn render(&self, snap: &Snapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0)?;

        // Sky
        ctx.set_fill_style_str(palette::SKY);
        ctx.fill_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64);

        // Ground: grass strip over dirt
        ctx.set_fill_style_str(palette::DIRT);
        ctx.fill_rect(
            0.0,
            GROUND_Y as f64,
            WORLD_WIDTH as f64,
            (WORLD_HEIGHT - GROUND_Y) as f64,
        );
        ctx.set_fill_style_str(palette::GROUND);
        ctx.fill_rect(0.0, GROUND_Y as f64, WORLD_WIDTH as f64, 6.0);

        let obstacle = palette::obstacle_color(snap.speed, self.base_speed).css();
        ctx.set_fill_style_str(&obstacle);
        for rect in &snap.obstacles {
            self.fill(rect);
        }

        ctx.set_fill_style_str(palette::PLAYER);
        self.fill(&snap.player);

        // HUD
        ctx.set_fill_style_str(palette::HUD_TEXT);
        ctx.set_font("bold 18px monospace");
        ctx.set_text_align("left");
        ctx.fill_text(&format!("Score {}", snap.score), 12.0, 26.0)?;
        ctx.set_text_align("right");
        ctx.fill_text(
            &format!("Best {}", snap.high_score),
            WORLD_WIDTH as f64 - 12.0,
            26.0,
        )?;

        if !snap.running {
            self.overlay(snap)?;
        }
        Ok(())
    }

    fn overlay(&self, snap: &Snapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(palette::OVERLAY);
        ctx.fill_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64);

        let (title, hint) = if snap.game_over {
            ("Game Over", "Jump or press R to run again")
        } else {
            ("Hop Runner", "Space, click or tap to start")
        };
        let cx = WORLD_WIDTH as f64 / 2.0;
        let cy = WORLD_HEIGHT as f64 / 2.0;

        ctx.set_fill_style_str(palette::HUD_TEXT);
        ctx.set_text_align("center");
        ctx.set_font("bold 32px monospace");
        ctx.fill_text(title, cx, cy - 8.0)?;
        ctx.set_font("16px monospace");
        ctx.fill_text(hint, cx, cy + 24.0)?;
        Ok(())
    }

    fn fill(&self, rect: &Rect) {
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }
}
