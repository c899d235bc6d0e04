//! World state for the aim game: targets, cursor, counters and the game-over latch.
//!
//! Nothing here touches the browser. The `game` module owns one `World` and feeds it
//! pointer events, timer ticks and frames; tests drive it directly.

use glam::DVec2;
use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::target::Target;

/// What a click did to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The game is over; clicks are swallowed until restart.
    Ignored,
    /// `count` targets were under the cursor and have been removed.
    Hit { count: u32 },
    /// Nothing was hit; `misses` is the new consecutive miss count.
    Miss { misses: u32 },
    /// This miss reached the threshold and ended the game.
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickReport {
    pub outcome: ClickOutcome,
    /// Set when the click raised the highscore; carries the new value.
    pub new_highscore: Option<u32>,
}

pub struct World {
    cfg: GameConfig,
    targets: Vec<Target>,
    cursor: DVec2,
    score: u32,
    misses: u32,
    highscore: u32,
    game_over: bool,
}

impl World {
    /// Empty world; `highscore` is the value loaded from storage.
    pub fn new(cfg: GameConfig, highscore: u32) -> Self {
        Self {
            cfg,
            targets: Vec::new(),
            cursor: DVec2::ZERO,
            score: 0,
            misses: 0,
            highscore,
            game_over: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn bounds(&self) -> DVec2 {
        DVec2::new(self.cfg.width(), self.cfg.height())
    }

    /// Add a specific target. Respects the game-over latch like [`World::spawn`].
    pub fn push_target(&mut self, target: Target) -> bool {
        if self.game_over {
            return false;
        }
        self.targets.push(target);
        true
    }

    /// Spawn one random target. Returns false (and does nothing) once the game is over.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.game_over {
            return false;
        }
        let target = Target::random(rng, &self.cfg);
        self.targets.push(target);
        true
    }

    /// Opening burst used at start and after restart.
    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..self.cfg.initial_targets {
            self.spawn(rng);
        }
        debug!("spawned burst, {} targets alive", self.targets.len());
    }

    /// Advance every target one frame. Frozen while the game is over.
    pub fn update(&mut self) {
        if self.game_over {
            return;
        }
        let bounds = self.bounds();
        for t in &mut self.targets {
            t.step(bounds);
        }
    }

    /// Track the cursor in canvas-local coordinates.
    ///
    /// Deliberately not gated by game-over: the scope keeps following the mouse
    /// on the game-over screen.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = DVec2::new(x, y);
    }

    /// Fire at the current cursor position.
    pub fn click(&mut self) -> ClickReport {
        if self.game_over {
            return ClickReport {
                outcome: ClickOutcome::Ignored,
                new_highscore: None,
            };
        }

        let cursor = self.cursor;
        let before = self.targets.len();
        // Every target under the cursor goes, overlapping ones included.
        self.targets.retain(|t| !t.contains(cursor));
        let hits = (before - self.targets.len()) as u32;

        if hits > 0 {
            self.score += hits;
            self.misses = 0;
            let new_highscore = if self.score > self.highscore {
                self.highscore = self.score;
                info!("new highscore {}", self.highscore);
                Some(self.highscore)
            } else {
                None
            };
            return ClickReport {
                outcome: ClickOutcome::Hit { count: hits },
                new_highscore,
            };
        }

        self.misses = (self.misses + 1).min(self.cfg.max_misses);
        let outcome = if self.misses >= self.cfg.max_misses {
            self.game_over = true;
            info!("game over at score {}", self.score);
            ClickOutcome::GameOver
        } else {
            ClickOutcome::Miss {
                misses: self.misses,
            }
        };
        ClickReport {
            outcome,
            new_highscore: None,
        }
    }

    /// Reset score, misses, targets and the game-over latch, then respawn the
    /// opening burst. The highscore is kept.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.score = 0;
        self.misses = 0;
        self.game_over = false;
        self.targets.clear();
        info!("restart, highscore {}", self.highscore);
        self.spawn_burst(rng);
    }

    /// Whether a target's center lies within the scope circle around the cursor.
    pub fn in_scope(&self, target: &Target) -> bool {
        target.center().distance(self.cursor) <= self.cfg.scope_radius
    }

    /// Split targets into `(outside, inside)` the scope. Each target lands in
    /// exactly one half, which is what keeps it from being drawn twice.
    pub fn partition_by_scope(&self) -> (Vec<&Target>, Vec<&Target>) {
        let (inside, outside): (Vec<&Target>, Vec<&Target>) =
            self.targets.iter().partition(|t| self.in_scope(t));
        (outside, inside)
    }
}
