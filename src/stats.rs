//! Frame timing.

/// Counts frames from a start time given in SDL ticks (milliseconds).
#[derive(Clone, Debug)]
pub struct FrameCounter {
    frames: u32,
    started: u32,
}

impl FrameCounter {
    /// Starts counting at `started` ticks.
    pub fn new(started: u32) -> FrameCounter {
        FrameCounter { frames: 0, started: started }
    }

    /// Counts one frame.
    pub fn tick(&mut self) {
        self.frames += 1;
    }

    /// Average rate up to `now` ticks; `None` unless time moved forward.
    pub fn frames_per_second(&self, now: u32) -> Option<f64> {
        if now > self.started {
            frames_per_second(self.frames, now - self.started)
        } else {
            None
        }
    }
}

/// `frames` over `elapsed` milliseconds.
pub fn frames_per_second(frames: u32, elapsed: u32) -> Option<f64> {
    if elapsed == 0 {
        None
    } else {
        Some(frames as f64 * 1000.0 / elapsed as f64)
    }
}
