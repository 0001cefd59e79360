// trail.rs - Pointer trail
//
// Bounded FIFO of recent pointer samples. Fade is by rank, not by time:
// the trail freezes when the pointer stops.

use std::collections::VecDeque;

use super::Point;
use crate::render::{Rgba, Surface};

pub const TRAIL_CAPACITY: usize = 20;
pub const MARKER_RADIUS: f32 = 8.0;

/// A trail point with its rank-derived fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub point: Point,
    /// Opacity and scale, 1.0 for the newest sample.
    pub fade: f32,
}

#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Point>,
    capacity: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TRAIL_CAPACITY)
    }
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { points: VecDeque::with_capacity(capacity + 1), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Reducer form of [`Trail::push`].
    pub fn reduce(mut self, point: Point) -> Self {
        self.push(point);
        self
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Oldest first, newest last.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    pub fn newest(&self) -> Option<Point> {
        self.points.back().copied()
    }

    /// Same order as [`Trail::points`], with `fade = 1 - rank / capacity`
    /// where rank 0 is the newest sample.
    pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
        let n = self.points.len();
        let cap = self.capacity as f32;
        self.points.iter().enumerate().map(move |(i, &point)| {
            let rank = (n - 1 - i) as f32;
            Marker { point, fade: 1.0 - rank / cap }
        })
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        for m in self.markers() {
            surface.fill_circle(m.point.x, m.point.y, MARKER_RADIUS * m.fade, Rgba::white(m.fade));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, Recorder};

    fn p(i: usize) -> Point {
        Point::new(i as f32, (i * 2) as f32)
    }

    #[test]
    fn keeps_last_twenty_in_arrival_order() {
        let trail = (0..25).fold(Trail::default(), |t, i| t.reduce(p(i)));
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        let kept: Vec<Point> = trail.points().collect();
        let expected: Vec<Point> = (5..25).map(p).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut trail = Trail::new(3);
        for i in 0..100 {
            trail.push(p(i));
            assert!(trail.len() <= 3);
        }
        assert_eq!(trail.newest(), Some(p(99)));
    }

    #[test]
    fn fade_by_rank_from_newest() {
        let trail = (0..TRAIL_CAPACITY).fold(Trail::default(), |t, i| t.reduce(p(i)));
        let markers: Vec<Marker> = trail.markers().collect();

        let newest = markers.last().unwrap();
        assert_eq!(newest.point, p(19));
        assert_eq!(newest.fade, 1.0);

        let oldest = markers.first().unwrap();
        assert!((oldest.fade - 0.05).abs() < 1e-6);

        for pair in markers.windows(2) {
            assert!(pair[0].fade < pair[1].fade);
        }
    }

    #[test]
    fn short_trail_newest_still_full() {
        let trail = Trail::default().reduce(p(1)).reduce(p(2));
        let fades: Vec<f32> = trail.markers().map(|m| m.fade).collect();
        assert_eq!(fades, vec![1.0 - 1.0 / 20.0, 1.0]);
    }

    #[test]
    fn render_scales_markers() {
        let trail = Trail::new(4).reduce(p(0)).reduce(p(1));
        let mut r = Recorder::new();
        trail.render(&mut r);
        assert_eq!(r.ops.len(), 3);
        assert_eq!(
            r.ops[2],
            DrawOp::Circle { x: 1.0, y: 2.0, radius: MARKER_RADIUS, color: Rgba::white(1.0) }
        );
        match r.ops[1] {
            DrawOp::Circle { radius, .. } => assert_eq!(radius, MARKER_RADIUS * 0.75),
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_trail_renders_blank() {
        let mut r = Recorder::new();
        Trail::default().render(&mut r);
        assert_eq!(r.ops, vec![DrawOp::Clear]);
    }
}
