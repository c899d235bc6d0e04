// Integration tests (native) for the `scope-shot` crate.
// These exercise the public game API without a browser so they run under
// `cargo test` on the host.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use scope_shot::{ClickOutcome, GameConfig, Target, World};

fn empty_world() -> World {
    World::new(GameConfig::default(), 0)
}

// One target, one hit, then five empty clicks end the round.
#[test]
fn hit_then_five_misses_is_game_over() {
    let mut w = empty_world();
    w.push_target(Target::new(10.0, 10.0, 10.0, 0.0, 0.0));
    w.pointer_move(15.0, 15.0);
    w.click();
    assert!(w.targets().is_empty());
    assert_eq!(w.score(), 1);

    w.pointer_move(300.0, 300.0);
    w.click();
    assert_eq!(w.misses(), 1);
    for _ in 0..3 {
        w.click();
    }
    assert!(!w.is_game_over());
    w.click();
    assert!(w.is_game_over());
    assert_eq!(w.score(), 1);
}

#[test]
fn targets_stay_on_canvas_for_many_frames() {
    let cfg = GameConfig {
        max_speed: 7.5,
        ..GameConfig::default()
    };
    let (width, height) = (cfg.width(), cfg.height());
    let mut w = World::new(cfg, 0);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    w.spawn_burst(&mut rng);
    for _ in 0..100 {
        w.spawn(&mut rng);
    }
    for _ in 0..5_000 {
        w.update();
        for t in w.targets() {
            assert!(t.pos.x >= 0.0 && t.pos.x <= width - t.size, "x out of range: {t:?}");
            assert!(t.pos.y >= 0.0 && t.pos.y <= height - t.size, "y out of range: {t:?}");
        }
    }
}

#[test]
fn counters_respect_their_invariants_under_random_play() {
    let mut w = empty_world();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    w.spawn_burst(&mut rng);
    let mut last_score = 0;
    let mut latched = false;
    for i in 0..2_000u32 {
        w.update();
        if i % 40 == 0 {
            w.spawn(&mut rng);
        }
        // Aim at a live target most of the time, otherwise at empty space.
        let aim = match w.targets().first() {
            Some(t) if i % 3 != 0 => t.center(),
            _ => glam::DVec2::new(-5.0, -5.0),
        };
        w.pointer_move(aim.x, aim.y);
        let outcome = w.click().outcome;

        assert!(w.score() >= last_score);
        last_score = w.score();
        assert!(w.misses() <= w.config().max_misses);
        assert!(w.highscore() >= w.score());
        if latched {
            assert!(w.is_game_over());
            assert_eq!(outcome, ClickOutcome::Ignored);
        }
        latched = w.is_game_over();
        assert_eq!(latched, w.misses() == w.config().max_misses);
    }
}

#[test]
fn restart_spawns_fresh_burst() {
    let mut w = empty_world();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    w.spawn_burst(&mut rng);
    w.pointer_move(-1.0, -1.0);
    for _ in 0..5 {
        w.click();
    }
    assert!(w.is_game_over());
    w.restart(&mut rng);
    assert_eq!(w.score(), 0);
    assert_eq!(w.misses(), 0);
    assert!(!w.is_game_over());
    assert_eq!(w.targets().len(), 25);
}

#[test]
fn boundary_exact_click_hits() {
    let mut w = empty_world();
    w.push_target(Target::new(100.0, 200.0, 8.0, 0.0, 0.0));
    w.pointer_move(108.0, 208.0);
    assert_eq!(w.click().outcome, ClickOutcome::Hit { count: 1 });
}
