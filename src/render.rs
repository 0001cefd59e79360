// render.rs - Drawing surface abstraction
//
// Simulators draw through `Surface` so they never touch a real canvas.
// The browser host implements it over a 2D context; tests use `Recorder`.

use std::fmt;

/// Raster target refreshed once per animation tick.
pub trait Surface {
    /// Wipe the whole surface to transparent.
    fn clear(&mut self);

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba);
}

/// 8-bit colour with a fractional alpha, as CSS expects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white(a: f32) -> Self {
        Self::new(255, 255, 255, a)
    }

    /// CSS colour string, e.g. `rgba(174, 194, 224, 0.5)`.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

// ============================================================================
// Headless surface
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle { x: f32, y: f32, radius: f32, color: Rgba },
    Line { from: (f32, f32), to: (f32, f32), width: f32, color: Rgba },
}

/// Records draw calls instead of rasterising them.
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops issued since the most recent clear.
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self.ops.iter().rposition(|op| *op == DrawOp::Clear).map_or(0, |i| i + 1);
        &self.ops[start..]
    }
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::Circle { x, y, radius, color });
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        self.ops.push(DrawOp::Line { from, to, width, color });
    }
}
