// input/ - Pointer-derived state
//
// Pure reducers over pointer samples. Event subscription lives in the
// host; these only see positions.

mod parallax;
mod trail;

pub use parallax::{Offset, Parallax, parallax_offset, DEFAULT_STRENGTH};
pub use trail::{Marker, Trail, MARKER_RADIUS, TRAIL_CAPACITY};

/// Pointer position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}
