//! Browser binding: canvas, pointer listeners, spawn timer, frame loop and HUD.
//!
//! The single `GameState` lives in a thread-local `RefCell`. Every callback
//! (animation frame, interval, mouse, restart button) borrows it, runs to
//! completion and releases it, so no two callbacks ever observe each other
//! half-way.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, window};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::render::render_frame;
use crate::storage::{DownloadHighscore, HighscoreStore, KeyValueStore, LocalStorage, MemoryStore};
use crate::world::{ClickOutcome, World};

const SCORE_ID: &str = "score";
const HIGHSCORE_ID: &str = "highscore";
const MISSES_ID: &str = "misses";
const RESTART_ID: &str = "restartBtn";
const HUD_ID: &str = "scope-hud";

struct GameState {
    ctx: CanvasRenderingContext2d,
    world: World,
    rng: ChaCha8Rng,
    highscores: HighscoreStore<Box<dyn KeyValueStore>>,
    restart_visible: bool,
}

thread_local! {
    static GAME: RefCell<Option<GameState>> = const { RefCell::new(None) };
}

/// Boot the game into the page. A second call while a game is running is a no-op.
pub fn start(cfg: GameConfig) -> Result<()> {
    cfg.validate()?;
    if GAME.with(|g| g.borrow().is_some()) {
        warn!("game already running; ignoring start request");
        return Ok(());
    }

    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    // Reuse the host page's canvas when present, otherwise create one.
    let canvas: HtmlCanvasElement = match doc.get_element_by_id(&cfg.canvas_id) {
        Some(el) => el
            .dyn_into()
            .map_err(|_| GameError::Dom(format!("#{} is not a canvas", cfg.canvas_id)))?,
        None => {
            let c: HtmlCanvasElement = doc
                .create_element("canvas")?
                .dyn_into()
                .map_err(|_| GameError::Dom("failed to create canvas".to_string()))?;
            c.set_id(&cfg.canvas_id);
            doc.body().ok_or(GameError::NoBody)?.append_child(&c)?;
            c
        }
    };
    canvas.set_width(cfg.canvas_width);
    canvas.set_height(cfg.canvas_height);
    canvas.style().set_property("cursor", "none")?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoContext)?
        .dyn_into()
        .map_err(|_| GameError::NoContext)?;

    let store: Box<dyn KeyValueStore> = match LocalStorage::open() {
        Some(ls) => Box::new(ls),
        None => {
            warn!("localStorage unavailable; highscore will not survive a reload");
            Box::new(MemoryStore::new())
        }
    };
    let mut highscores = HighscoreStore::new(store, cfg.highscore_key.clone());
    if cfg.download_highscore {
        highscores.add_observer(Box::new(DownloadHighscore));
    }

    let spawn_interval = cfg.spawn_interval_ms;
    let mut world = World::new(cfg, highscores.load());
    let mut rng = ChaCha8Rng::from_entropy();
    world.spawn_burst(&mut rng);

    ensure_hud(&doc)?;
    refresh_hud(&doc, &world);
    set_restart_visible(&doc, false);

    info!(
        "scope game started, {} targets, highscore {}",
        world.targets().len(),
        world.highscore()
    );

    GAME.with(|g| {
        g.replace(Some(GameState {
            ctx,
            world,
            rng,
            highscores,
            restart_visible: false,
        }))
    });

    // Pointer move: canvas-local cursor. Not gated by game over.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let x = evt.offset_x() as f64;
            let y = evt.offset_y() as f64;
            GAME.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    st.world.pointer_move(x, y);
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Click: fire at the cursor.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            GAME.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    on_click(st);
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Restart button.
    if let Some(btn) = doc.get_element_by_id(RESTART_ID) {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            restart();
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Spawn timer.
    {
        let closure = Closure::wrap(Box::new(move || {
            GAME.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    st.world.spawn(&mut st.rng);
                }
            });
        }) as Box<dyn FnMut()>);
        win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            spawn_interval.min(i32::MAX as u32) as i32,
        )?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

/// Reset the running game (score, misses, targets) and respawn the opening burst.
pub fn restart() {
    GAME.with(|cell| {
        if let Some(st) = cell.borrow_mut().as_mut() {
            restart_state(st);
        }
    });
}

fn restart_state(st: &mut GameState) {
    st.world.restart(&mut st.rng);
    st.restart_visible = false;
    if let Some(doc) = window().and_then(|w| w.document()) {
        set_restart_visible(&doc, false);
        refresh_hud(&doc, &st.world);
    }
}

fn on_click(st: &mut GameState) {
    let report = st.world.click();
    if report.outcome == ClickOutcome::Ignored {
        return;
    }
    if let Some(best) = report.new_highscore {
        if !st.highscores.record(best) {
            debug!("highscore {best} not persisted (stored value is not lower, or the write failed)");
        }
    }
    if let Some(doc) = window().and_then(|w| w.document()) {
        refresh_hud(&doc, &st.world);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        GAME.with(|cell| {
            if let Some(st) = cell.borrow_mut().as_mut() {
                tick(st);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(closure)) = (window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

fn tick(st: &mut GameState) {
    st.world.update();
    render_frame(&st.world, &mut st.ctx);

    let game_over = st.world.is_game_over();
    if game_over != st.restart_visible {
        st.restart_visible = game_over;
        if let Some(doc) = window().and_then(|w| w.document()) {
            set_restart_visible(&doc, game_over);
        }
    }
}

// --- HUD ---------------------------------------------------------------------

/// Create any missing readouts and the restart button. Host pages may ship their own.
fn ensure_hud(doc: &Document) -> Result<()> {
    let missing_readouts: Vec<(&str, &str)> = [
        (SCORE_ID, "Score"),
        (HIGHSCORE_ID, "Highscore"),
        (MISSES_ID, "Misses"),
    ]
    .into_iter()
    .filter(|(id, _)| doc.get_element_by_id(id).is_none())
    .collect();
    let needs_button = doc.get_element_by_id(RESTART_ID).is_none();
    if missing_readouts.is_empty() && !needs_button {
        return Ok(());
    }

    let hud = match doc.get_element_by_id(HUD_ID) {
        Some(el) => el,
        None => {
            let div = doc.create_element("div")?;
            div.set_id(HUD_ID);
            div.set_attribute("style", "font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; color:#ffd166;")?;
            doc.body().ok_or(GameError::NoBody)?.append_child(&div)?;
            div
        }
    };
    for (id, label) in missing_readouts {
        let span = doc.create_element("span")?;
        span.set_inner_html(&format!("{label}: <span id=\"{id}\">0</span> "));
        hud.append_child(&span)?;
    }
    if needs_button {
        let btn = doc.create_element("button")?;
        btn.set_id(RESTART_ID);
        btn.set_text_content(Some("Restart"));
        hud.append_child(&btn)?;
    }
    Ok(())
}

fn refresh_hud(doc: &Document, world: &World) {
    for (id, value) in [
        (SCORE_ID, world.score()),
        (HIGHSCORE_ID, world.highscore()),
        (MISSES_ID, world.misses()),
    ] {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_text_content(Some(&value.to_string()));
        }
    }
}

fn set_restart_visible(doc: &Document, visible: bool) {
    let Some(btn) = doc
        .get_element_by_id(RESTART_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let display = if visible { "inline-block" } else { "none" };
    if btn.style().set_property("display", display).is_err() {
        warn!("could not toggle restart button");
    }
}
