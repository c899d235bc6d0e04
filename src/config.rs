//! Tuning constants for the aim game.
//!
//! Defaults reproduce the classic browser version: an 800x600 canvas, a 130px
//! scope at 2.5x zoom, five misses until game over and a fresh target every
//! 800ms on top of a 25-target opening burst.

use crate::error::{GameError, Result};

/// Fixed name of the persisted highscore entry.
pub const HIGHSCORE_KEY: &str = "highscore";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    /// Id of the `<canvas>` element to draw into; created when missing.
    pub canvas_id: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub scope_radius: f64,
    pub zoom_factor: f64,
    /// Consecutive misses that end the game.
    pub max_misses: u32,
    /// Targets spawned at start and on every restart.
    pub initial_targets: usize,
    pub spawn_interval_ms: u32,
    pub min_target_size: f64,
    pub max_target_size: f64,
    /// Each velocity component is sampled from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    /// Half length of the small cursor crosshair.
    pub crosshair_half: f64,
    pub highscore_key: String,
    /// Offer "highscore.txt" as a download whenever a new highscore is set.
    pub download_highscore: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_id: "gameCanvas".to_string(),
            canvas_width: 800,
            canvas_height: 600,
            scope_radius: 130.0,
            zoom_factor: 2.5,
            max_misses: 5,
            initial_targets: 25,
            spawn_interval_ms: 800,
            min_target_size: 4.0,
            max_target_size: 12.0,
            max_speed: 1.0,
            crosshair_half: 8.0,
            highscore_key: HIGHSCORE_KEY.to_string(),
            download_highscore: false,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON object; omitted fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn width(&self) -> f64 {
        self.canvas_width as f64
    }

    pub fn height(&self) -> f64 {
        self.canvas_height as f64
    }

    pub fn validate(&self) -> Result<()> {
        let bad = |msg: &str| Err(GameError::InvalidConfig(msg.to_string()));
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return bad("canvas dimensions must be positive");
        }
        if !positive(self.scope_radius) {
            return bad("scope_radius must be positive and finite");
        }
        if !positive(self.zoom_factor) {
            return bad("zoom_factor must be positive and finite");
        }
        if self.max_misses == 0 {
            return bad("max_misses must be at least 1");
        }
        if self.spawn_interval_ms == 0 {
            return bad("spawn_interval_ms must be positive");
        }
        if !positive(self.min_target_size) || !positive(self.max_target_size) {
            return bad("target sizes must be positive and finite");
        }
        if self.min_target_size >= self.max_target_size {
            return bad("target size range must satisfy min < max");
        }
        if self.max_target_size >= self.width() || self.max_target_size >= self.height() {
            return bad("targets must fit inside the canvas");
        }
        // A target may not cross the canvas in a single frame.
        if !positive(self.max_speed) || self.max_speed >= self.width().min(self.height()) {
            return bad("max_speed must be positive and below the smaller canvas side");
        }
        if !(self.crosshair_half.is_finite() && self.crosshair_half >= 0.0) {
            return bad("crosshair_half must be finite and non-negative");
        }
        if self.highscore_key.is_empty() {
            return bad("highscore_key must not be empty");
        }
        Ok(())
    }
}
