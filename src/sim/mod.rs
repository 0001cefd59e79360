// sim/ - Ambient canvas simulations
//
// Entity management using Structure-of-Arrays for cache efficiency.
// Each entity type in its own module; each owns its arrays and its RNG.

mod particle;
mod rain;

pub use particle::Particles;
pub use rain::Rain;

use crate::render::Surface;

// Default pool sizes
pub const PARTICLE_COUNT: usize = 50;
pub const DROP_COUNT: usize = 100;

/// Nominal frame rate velocities are expressed against.
pub const FRAME_RATE: f32 = 60.0;

/// A simulation driven by an external frame scheduler.
pub trait Animated {
    /// Advance by `dt` seconds and redraw into `surface`.
    fn frame(&mut self, dt: f32, surface: &mut dyn Surface);

    /// Viewport changed; the pool is re-seeded for the new bounds.
    fn resize(&mut self, w: u32, h: u32);
}

// Random number generator (xorshift32), uniform in [0, 1)
#[inline(always)]
pub fn rand(rng: &mut u32) -> f32 {
    *rng ^= *rng << 13;
    *rng ^= *rng >> 17;
    *rng ^= *rng << 5;
    (*rng >> 8) as f32 * (1.0 / 16777216.0)
}

/// xorshift is stuck at zero, so zero seeds are remapped.
#[inline]
pub fn seed(value: u32) -> u32 {
    if value == 0 { 0xDEADBEEF } else { value }
}
