use glam::DVec2;
use rand::Rng;

use crate::config::GameConfig;

/// A moving axis-aligned square the player has to click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Top-left corner in canvas pixels.
    pub pos: DVec2,
    /// Edge length.
    pub size: f64,
    /// Displacement per frame.
    pub vel: DVec2,
}

impl Target {
    pub fn new(x: f64, y: f64, size: f64, speed_x: f64, speed_y: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size,
            vel: DVec2::new(speed_x, speed_y),
        }
    }

    /// Sample a target that lies entirely inside the canvas with an unbiased heading.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, cfg: &GameConfig) -> Self {
        let size = rng.gen_range(cfg.min_target_size..cfg.max_target_size);
        let x = rng.gen_range(0.0..(cfg.width() - size));
        let y = rng.gen_range(0.0..(cfg.height() - size));
        let speed_x = rng.gen_range(-cfg.max_speed..cfg.max_speed);
        let speed_y = rng.gen_range(-cfg.max_speed..cfg.max_speed);
        Self::new(x, y, size, speed_x, speed_y)
    }

    pub fn center(&self) -> DVec2 {
        self.pos + DVec2::splat(self.size / 2.0)
    }

    /// Inclusive bounding box test.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.pos.x
            && p.x <= self.pos.x + self.size
            && p.y >= self.pos.y
            && p.y <= self.pos.y + self.size
    }

    /// Advance one frame inside a `bounds.x` by `bounds.y` canvas, bouncing off the edges.
    ///
    /// A crossed edge flips the velocity on that axis and the square is pulled back
    /// onto the edge, so it never renders outside the canvas.
    pub fn step(&mut self, bounds: DVec2) {
        self.pos += self.vel;
        let max = (bounds - DVec2::splat(self.size)).max(DVec2::ZERO);

        if self.pos.x < 0.0 {
            self.vel.x = self.vel.x.abs();
            self.pos.x = 0.0;
        } else if self.pos.x > max.x {
            self.vel.x = -self.vel.x.abs();
            self.pos.x = max.x;
        }

        if self.pos.y < 0.0 {
            self.vel.y = self.vel.y.abs();
            self.pos.y = 0.0;
        } else if self.pos.y > max.y {
            self.vel.y = -self.vel.y.abs();
            self.pos.y = max.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const BOUNDS: DVec2 = DVec2::new(800.0, 600.0);

    #[test]
    fn contains_is_inclusive_on_every_edge() {
        let t = Target::new(10.0, 10.0, 10.0, 0.0, 0.0);
        assert!(t.contains(DVec2::new(10.0, 10.0)));
        assert!(t.contains(DVec2::new(20.0, 20.0)));
        assert!(t.contains(DVec2::new(10.0, 20.0)));
        assert!(t.contains(DVec2::new(20.0, 15.0)));
        assert!(!t.contains(DVec2::new(9.999, 15.0)));
        assert!(!t.contains(DVec2::new(15.0, 20.001)));
    }

    #[test]
    fn center_is_middle_of_square() {
        let t = Target::new(10.0, 20.0, 8.0, 0.0, 0.0);
        assert_eq!(t.center(), DVec2::new(14.0, 24.0));
    }

    #[test]
    fn bounces_off_left_edge() {
        let mut t = Target::new(0.5, 100.0, 10.0, -1.0, 0.0);
        t.step(BOUNDS);
        assert_eq!(t.pos.x, 0.0);
        assert_eq!(t.vel.x, 1.0);
        t.step(BOUNDS);
        assert_eq!(t.pos.x, 1.0);
    }

    #[test]
    fn bounces_off_bottom_right_corner() {
        let mut t = Target::new(789.5, 589.5, 10.0, 1.0, 1.0);
        t.step(BOUNDS);
        assert_eq!(t.pos, DVec2::new(790.0, 590.0));
        assert_eq!(t.vel, DVec2::new(-1.0, -1.0));
    }

    #[test]
    fn random_targets_start_inside_canvas() {
        let cfg = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let t = Target::random(&mut rng, &cfg);
            assert!(t.size >= cfg.min_target_size && t.size < cfg.max_target_size);
            assert!(t.pos.x >= 0.0 && t.pos.x + t.size <= cfg.width());
            assert!(t.pos.y >= 0.0 && t.pos.y + t.size <= cfg.height());
            assert!(t.vel.x.abs() <= cfg.max_speed && t.vel.y.abs() <= cfg.max_speed);
        }
    }
}
