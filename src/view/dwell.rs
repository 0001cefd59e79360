// dwell.rs - Cancellable countdown
//
// Holds at most one pending deadline. Cancelling disarms it; a disarmed
// dwell never fires.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dwell {
    remaining: Option<f32>,
}

impl Dwell {
    pub fn idle() -> Self {
        Self { remaining: None }
    }

    /// Arm for `secs`, replacing any pending deadline.
    pub fn start(&mut self, secs: f32) {
        self.remaining = Some(secs.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Count down by `dt`. When the deadline passes the dwell disarms and
    /// returns the overshoot, i.e. how much of `dt` is left over.
    /// Negative or non-finite `dt` counts as no time passing.
    pub fn consume(&mut self, dt: f32) -> Option<f32> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let left = self.remaining? - dt;
        if left <= 0.0 {
            self.remaining = None;
            Some(-left)
        } else {
            self.remaining = Some(left);
            None
        }
    }
}
