use std::time::{Duration, Instant};

/// Time elapsed between two frames.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestep(f32);

impl Timestep {
    pub fn from_seconds(seconds: f32) -> Self {
        Self(seconds)
    }

    pub fn seconds(self) -> f32 {
        self.0
    }

    pub fn millis(self) -> f32 {
        self.0 * 1000.0
    }
}

impl From<Duration> for Timestep {
    fn from(duration: Duration) -> Self {
        Self(duration.as_secs_f32())
    }
}

/// Monotonic frame timer.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Time since the previous tick (or since construction on the first).
    pub fn tick(&mut self) -> Timestep {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;
        dt.into()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
