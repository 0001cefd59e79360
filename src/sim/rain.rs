// rain.rs - Falling rain streaks
//
// Fixed-size recycling pool: a drop that falls past the bottom edge is
// moved back above the top at a fresh x instead of being freed.

use super::{Animated, DROP_COUNT, FRAME_RATE, rand, seed};
use crate::render::{Rgba, Surface};

const LEN_MIN: f32 = 10.0;
const LEN_SPAN: f32 = 20.0;
const SPEED_MIN: f32 = 5.0;
const SPEED_SPAN: f32 = 5.0;

pub const RAIN_COLOR: Rgba = Rgba::new(174, 194, 224, 0.5);
pub const RAIN_WIDTH: f32 = 1.0;

pub struct Rain {
    // Head position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Streak length and fall speed (px per nominal frame)
    pub length: Vec<f32>,
    pub speed: Vec<f32>,

    w: f32,
    h: f32,
    rng: u32,
}

impl Rain {
    pub fn new(w: u32, h: u32, rng_seed: u32) -> Self {
        Self::with_count(DROP_COUNT, w, h, rng_seed)
    }

    pub fn with_count(count: usize, w: u32, h: u32, rng_seed: u32) -> Self {
        let mut rain = Self {
            x: Vec::with_capacity(count),
            y: Vec::with_capacity(count),
            length: Vec::with_capacity(count),
            speed: Vec::with_capacity(count),
            w: w as f32,
            h: h as f32,
            rng: seed(rng_seed),
        };
        rain.spawn(count);
        rain
    }

    fn spawn(&mut self, count: usize) {
        self.x.clear();
        self.y.clear();
        self.length.clear();
        self.speed.clear();

        for _ in 0..count {
            let rng = &mut self.rng;
            self.x.push(rand(rng) * self.w);
            self.y.push(rand(rng) * self.h);
            self.length.push(LEN_MIN + rand(rng) * LEN_SPAN);
            self.speed.push(SPEED_MIN + rand(rng) * SPEED_SPAN);
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.w, self.h)
    }

    pub fn tick(&mut self) {
        self.step(1.0);
    }

    pub fn advance(&mut self, dt: f32) {
        self.step(dt * FRAME_RATE);
    }

    fn step(&mut self, frames: f32) {
        for i in 0..self.x.len() {
            self.y[i] += self.speed[i] * frames;

            // Off the bottom: recycle above the top
            if self.y[i] > self.h {
                self.y[i] = -self.length[i];
                self.x[i] = rand(&mut self.rng) * self.w;
            }
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        for i in 0..self.x.len() {
            let (x, y) = (self.x[i], self.y[i]);
            surface.stroke_line((x, y), (x, y + self.length[i]), RAIN_WIDTH, RAIN_COLOR);
        }
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w as f32;
        self.h = h as f32;
        let n = self.len();
        self.spawn(n);
    }
}

impl Animated for Rain {
    // Draw first, then fall: a recycled drop is first seen at the top.
    fn frame(&mut self, dt: f32, surface: &mut dyn Surface) {
        self.render(surface);
        self.advance(dt);
    }

    fn resize(&mut self, w: u32, h: u32) {
        Rain::resize(self, w, h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, Recorder};

    #[test]
    fn spawn_ranges() {
        let rain = Rain::new(640, 480, 11);
        assert_eq!(rain.len(), DROP_COUNT);
        for i in 0..rain.len() {
            assert!((0.0..640.0).contains(&rain.x[i]));
            assert!((0.0..480.0).contains(&rain.y[i]));
            assert!((10.0..30.0).contains(&rain.length[i]));
            assert!((5.0..10.0).contains(&rain.speed[i]));
        }
    }

    #[test]
    fn falls_by_speed_then_recycles_to_minus_length() {
        let mut rain = Rain::with_count(1, 200, 100, 4);
        rain.y[0] = 90.0;
        rain.speed[0] = 5.0;
        rain.length[0] = 20.0;

        rain.tick();
        assert_eq!(rain.y[0], 95.0);
        rain.tick();
        assert_eq!(rain.y[0], 100.0); // at the edge, not past it

        let x_before = rain.x[0];
        rain.tick();
        assert_eq!(rain.y[0], -20.0);
        assert!((0.0..200.0).contains(&rain.x[0]));
        assert_ne!(rain.x[0], x_before);
    }

    #[test]
    fn y_monotonic_between_recycles() {
        let mut rain = Rain::new(300, 300, 8);
        for _ in 0..500 {
            let before = rain.y.clone();
            rain.tick();
            for i in 0..rain.len() {
                if rain.y[i] == -rain.length[i] {
                    assert!(before[i] + rain.speed[i] > 300.0);
                } else {
                    assert_eq!(rain.y[i], before[i] + rain.speed[i]);
                }
            }
        }
    }

    #[test]
    fn frame_draws_before_advancing() {
        let mut rain = Rain::with_count(2, 100, 100, 9);
        let heads: Vec<f32> = rain.y.clone();
        let mut r = Recorder::new();
        rain.frame(1.0 / FRAME_RATE, &mut r);

        assert_eq!(r.ops.len(), 3);
        for (i, op) in r.ops[1..].iter().enumerate() {
            match op {
                DrawOp::Line { from, to, width, color } => {
                    assert_eq!(from.1, heads[i]);
                    assert!((to.1 - from.1 - rain.length[i]).abs() < 1e-3);
                    assert_eq!(from.0, to.0);
                    assert_eq!(*width, RAIN_WIDTH);
                    assert_eq!(*color, RAIN_COLOR);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
