//! Per-frame drawing.
//!
//! The renderer only needs a handful of 2D primitives, collected in [`Surface`].
//! The browser implementation lives in `canvas.rs`; tests record calls instead.

use crate::target::Target;
use crate::world::World;

const TARGET_COLOR: &str = "red";
const DIM_OVERLAY: &str = "rgba(0,0,0,0.5)";
const GAME_OVER_OVERLAY: &str = "rgba(0,0,0,0.7)";
const SCOPE_COLOR: &str = "#111";
const SCOPE_RING_WIDTH: f64 = 6.0;
const SCOPE_LINE_WIDTH: f64 = 2.0;
const CROSSHAIR_COLOR: &str = "lime";
const GAME_OVER_FONT: &str = "50px Arial";
pub const GAME_OVER_TEXT: &str = "GAME OVER";

/// Minimal 2D drawing surface.
///
/// Shaped after `CanvasRenderingContext2d`, which implements it in
/// `canvas.rs`: `clip_circle` is `beginPath` + `arc` + `clip`, `save`/`restore`
/// and `translate`/`scale` forward to the context's transform stack, and
/// `fill_text_centered` sets center alignment before `fillText`.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64);
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn save(&mut self);
    fn restore(&mut self);
    /// Intersect the clip region with a circle.
    fn clip_circle(&mut self, cx: f64, cy: f64, r: f64);
    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, factor: f64);
    /// Draw text horizontally centered on `x`.
    fn fill_text_centered(&mut self, text: &str, x: f64, y: f64, font: &str);
}

/// Draw one frame: world, dimming, scope, crosshair, then the game-over overlay.
pub fn render_frame<S: Surface + ?Sized>(world: &World, s: &mut S) {
    let cfg = world.config();
    let (w, h) = (cfg.width(), cfg.height());
    let cursor = world.cursor();
    let (outside, inside) = world.partition_by_scope();

    s.clear_rect(0.0, 0.0, w, h);

    draw_targets(s, &outside);

    s.set_fill_style(DIM_OVERLAY);
    s.fill_rect(0.0, 0.0, w, h);

    // Magnified view, zoom anchored on the cursor.
    s.save();
    s.clip_circle(cursor.x, cursor.y, cfg.scope_radius);
    s.translate(cursor.x, cursor.y);
    s.scale(cfg.zoom_factor);
    s.translate(-cursor.x, -cursor.y);
    draw_targets(s, &inside);
    s.restore();

    draw_scope_frame(s, cursor.x, cursor.y, cfg.scope_radius);
    draw_crosshair(s, cursor.x, cursor.y, cfg.crosshair_half);

    if world.is_game_over() {
        s.set_fill_style(GAME_OVER_OVERLAY);
        s.fill_rect(0.0, 0.0, w, h);
        s.set_fill_style(TARGET_COLOR);
        s.fill_text_centered(GAME_OVER_TEXT, w / 2.0, h / 2.0, GAME_OVER_FONT);
    }
}

fn draw_targets<S: Surface + ?Sized>(s: &mut S, targets: &[&Target]) {
    s.set_fill_style(TARGET_COLOR);
    for t in targets {
        s.fill_rect(t.pos.x, t.pos.y, t.size, t.size);
    }
}

fn draw_scope_frame<S: Surface + ?Sized>(s: &mut S, x: f64, y: f64, r: f64) {
    s.set_stroke_style(SCOPE_COLOR);
    s.set_line_width(SCOPE_RING_WIDTH);
    s.stroke_circle(x, y, r);

    s.set_line_width(SCOPE_LINE_WIDTH);
    s.stroke_line(x - r, y, x + r, y);
    s.stroke_line(x, y - r, x, y + r);
}

fn draw_crosshair<S: Surface + ?Sized>(s: &mut S, x: f64, y: f64, half: f64) {
    s.set_stroke_style(CROSSHAIR_COLOR);
    s.set_line_width(1.0);
    s.stroke_line(x - half, y, x + half, y);
    s.stroke_line(x, y - half, x, y + half);
}
