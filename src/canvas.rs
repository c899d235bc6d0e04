use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::render::Surface;

impl Surface for CanvasRenderingContext2d {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.set_stroke_style_str(style);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.begin_path();
        self.arc(cx, cy, r, 0.0, TAU).ok();
        self.stroke();
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.begin_path();
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.stroke();
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn clip_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.begin_path();
        self.arc(cx, cy, r, 0.0, TAU).ok();
        self.clip();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        CanvasRenderingContext2d::translate(self, dx, dy).ok();
    }

    fn scale(&mut self, factor: f64) {
        CanvasRenderingContext2d::scale(self, factor, factor).ok();
    }

    fn fill_text_centered(&mut self, text: &str, x: f64, y: f64, font: &str) {
        self.set_font(font);
        self.set_text_align("center");
        self.fill_text(text, x, y).ok();
    }
}
