// Frame-advance timer shared by sprite and tile animations

/// Steps a frame index through a table at a fixed interval.
///
/// Overshoot past a frame boundary is carried into the next frame instead
/// of being discarded, so the long-run frame rate stays exact even when
/// `dt` is irregular.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTimer {
    index: usize,
    remaining: f32,
    interval: f32,
}

impl FrameTimer {
    /// Create a timer that advances every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            index: 0,
            remaining: interval,
            interval,
        }
    }

    /// Advance by `dt` over a table of `len` frames and return the new index.
    ///
    /// A non-positive interval advances exactly one frame per call.
    pub fn advance(&mut self, dt: f32, len: usize) -> usize {
        self.remaining -= dt;

        if self.interval > 0.0 {
            if self.remaining <= 0.0 {
                // whole intervals needed to bring `remaining` above zero
                let steps = (-self.remaining / self.interval).floor() + 1.0;
                self.remaining += steps * self.interval;
                // f32 rounding on huge `dt` can land just outside (0, interval]
                self.remaining = self.remaining.clamp(f32::MIN_POSITIVE, self.interval);
                self.step(len, steps as usize);
            }
        } else if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.step(len, 1);
        }

        // Tables sharing one timer may differ in length
        if self.index >= len {
            self.index = 0;
        }
        self.index
    }

    fn step(&mut self, len: usize, mut steps: usize) {
        if len == 0 {
            self.index = 0;
            return;
        }
        // An index left over from a longer table wraps on its first step
        if self.index >= len && steps > 0 {
            self.index = 0;
            steps -= 1;
        }
        self.index = (self.index + steps % len) % len;
    }

    /// Current frame index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Time left until the next frame
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Back to the first frame with a full interval pending
    pub fn reset(&mut self) {
        self.index = 0;
        self.remaining = self.interval;
    }
}
