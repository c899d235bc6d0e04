//! Scope Shot core crate.
//!
//! Moving square targets drift around a canvas; the player aims through a
//! magnifying scope that follows the mouse and clicks to destroy them. Five
//! misses in a row end the round. The best score is kept in `localStorage`.
//!
//! Game rules live in [`world`] and [`target`] and are plain Rust, so they are
//! tested natively. [`game`] wires them to the browser.

use wasm_bindgen::prelude::*;

pub mod canvas;
pub mod config;
pub mod error;
mod game;
pub mod logger;
pub mod render;
pub mod storage;
pub mod target;
pub mod world;

pub use config::{GameConfig, HIGHSCORE_KEY};
pub use error::GameError;
pub use render::{Surface, render_frame};
pub use storage::{HighscoreObserver, HighscoreStore, KeyValueStore, MemoryStore};
pub use target::Target;
pub use world::{ClickOutcome, ClickReport, World};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Start with the default configuration.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start(GameConfig::default()).map_err(Into::into)
}

/// Start with a JSON config object; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = GameConfig::from_json(json)?;
    game::start(cfg).map_err(Into::into)
}

/// Same as clicking the restart button.
#[wasm_bindgen]
pub fn restart_game() {
    game::restart();
}
