// particle.rs - Drifting dust particles
//
// Structure-of-Arrays layout. Particles bounce off the viewport edges:
// a velocity component flips when the particle is outside that axis and
// still moving outward, so the position is reflected rather than clamped.

use super::{Animated, FRAME_RATE, PARTICLE_COUNT, rand, seed};
use crate::render::{Rgba, Surface};

const RADIUS_MIN: f32 = 1.0;
const RADIUS_SPAN: f32 = 2.0;
const ALPHA_MIN: f32 = 0.5;
const ALPHA_SPAN: f32 = 0.5;
const SPEED_SPAN: f32 = 0.5; // velocity in [-0.25, 0.25) px/frame

pub struct Particles {
    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Velocity (px per nominal frame)
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    // Look
    pub radius: Vec<f32>,
    pub alpha: Vec<f32>,

    w: f32,
    h: f32,
    rng: u32,
}

impl Particles {
    pub fn new(w: u32, h: u32, rng_seed: u32) -> Self {
        Self::with_count(PARTICLE_COUNT, w, h, rng_seed)
    }

    pub fn with_count(count: usize, w: u32, h: u32, rng_seed: u32) -> Self {
        let mut p = Self {
            x: Vec::with_capacity(count),
            y: Vec::with_capacity(count),
            vx: Vec::with_capacity(count),
            vy: Vec::with_capacity(count),
            radius: Vec::with_capacity(count),
            alpha: Vec::with_capacity(count),
            w: w as f32,
            h: h as f32,
            rng: seed(rng_seed),
        };
        p.spawn(count);
        p
    }

    fn spawn(&mut self, count: usize) {
        self.x.clear();
        self.y.clear();
        self.vx.clear();
        self.vy.clear();
        self.radius.clear();
        self.alpha.clear();

        for _ in 0..count {
            let rng = &mut self.rng;
            self.x.push(rand(rng) * self.w);
            self.y.push(rand(rng) * self.h);
            self.radius.push(RADIUS_MIN + rand(rng) * RADIUS_SPAN);
            self.alpha.push(ALPHA_MIN + rand(rng) * ALPHA_SPAN);
            self.vx.push((rand(rng) - 0.5) * SPEED_SPAN);
            self.vy.push((rand(rng) - 0.5) * SPEED_SPAN);
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

    /// One nominal frame.
    pub fn tick(&mut self) {
        self.step(1.0);
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.step(dt * FRAME_RATE);
    }

    fn step(&mut self, frames: f32) {
        for i in 0..self.x.len() {
            self.x[i] += self.vx[i] * frames;
            self.y[i] += self.vy[i] * frames;

            if (self.x[i] < 0.0 && self.vx[i] < 0.0) || (self.x[i] > self.w && self.vx[i] > 0.0) {
                self.vx[i] = -self.vx[i];
            }
            if (self.y[i] < 0.0 && self.vy[i] < 0.0) || (self.y[i] > self.h && self.vy[i] > 0.0) {
                self.vy[i] = -self.vy[i];
            }
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        for i in 0..self.x.len() {
            surface.fill_circle(self.x[i], self.y[i], self.radius[i], Rgba::white(self.alpha[i]));
        }
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w as f32;
        self.h = h as f32;
        let n = self.len();
        self.spawn(n);
    }
}

impl Animated for Particles {
    fn frame(&mut self, dt: f32, surface: &mut dyn Surface) {
        self.advance(dt);
        self.render(surface);
    }

    fn resize(&mut self, w: u32, h: u32) {
        Particles::resize(self, w, h);
    }
}
