// parallax.rs - Pointer parallax
//
// Background offset is the pointer's displacement from the viewport
// centre, damped by `strength`. Stateless.

use super::Point;

pub const DEFAULT_STRENGTH: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    /// CSS transform translating a layer by this offset.
    pub fn css_transform(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }
}

#[inline]
pub fn parallax_offset(pointer: Point, viewport: (f32, f32), strength: f32) -> Offset {
    Offset {
        x: (pointer.x - viewport.0 / 2.0) * strength,
        y: (pointer.y - viewport.1 / 2.0) * strength,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub strength: f32,
}

impl Default for Parallax {
    fn default() -> Self {
        Self { strength: DEFAULT_STRENGTH }
    }
}

impl Parallax {
    pub fn new(strength: f32) -> Self {
        Self { strength }
    }

    pub fn offset(&self, pointer: Point, viewport: (f32, f32)) -> Offset {
        parallax_offset(pointer, viewport, self.strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_is_origin() {
        let o = Parallax::default().offset(Point::new(640.0, 360.0), (1280.0, 720.0));
        assert_eq!(o, Offset { x: 0.0, y: 0.0 });
    }

    #[test]
    fn linear_in_strength() {
        let ptr = Point::new(900.0, 100.0);
        let vp = (1000.0, 600.0);
        let a = parallax_offset(ptr, vp, 0.1);
        let b = parallax_offset(ptr, vp, 0.3);
        assert!((b.x - 3.0 * a.x).abs() < 1e-4);
        assert!((b.y - 3.0 * a.y).abs() < 1e-4);
        assert!((a.x - 40.0).abs() < 1e-4);
        assert!((a.y + 20.0).abs() < 1e-4);
    }

    #[test]
    fn zero_strength_pins_layer() {
        let o = parallax_offset(Point::new(3.0, 4.0), (100.0, 100.0), 0.0);
        assert_eq!(o.x, 0.0);
        assert_eq!(o.y, 0.0);
    }

    #[test]
    fn transform_string() {
        assert_eq!(Offset { x: -4.5, y: 2.0 }.css_transform(), "translate(-4.5px, 2px)");
    }
}
