//! Keyboard control of the swap interval.

use input::Key;

/// Swap interval adjusted with `O` (down) and `P` (up).
#[derive(Clone, Debug)]
pub struct SwapControl {
    interval: i32,
    changed: bool,
}

impl SwapControl {
    /// Starts at `interval`, with nothing pending.
    pub fn new(interval: i32) -> SwapControl {
        SwapControl {
            interval: interval,
            changed: false,
        }
    }

    /// The current interval.
    pub fn interval(&self) -> i32 {
        self.interval
    }

    /// Reacts to a key press; keys other than `O` and `P` are ignored.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::O => self.interval -= 1,
            Key::P => self.interval += 1,
            _ => return,
        }
        self.changed = true;
    }

    /// The interval to apply this frame, if any key changed it.
    pub fn take_update(&mut self) -> Option<i32> {
        if self.changed {
            self.changed = false;
            Some(self.interval)
        } else {
            None
        }
    }
}
