use std::cell::Cell;
use std::time::Instant;

use crate::traits::TimeSource;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Wall clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_millis(&self) -> f64 {
        chrono::Utc::now().timestamp_millis() as f64
    }
}

/// Manually advanced clock
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: Cell<f64>,
}

impl ManualClock {
    pub fn new(millis: f64) -> Self {
        Self {
            millis: Cell::new(millis),
        }
    }

    pub fn set(&self, millis: f64) {
        self.millis.set(millis);
    }

    pub fn advance(&self, millis: f64) {
        self.millis.set(self.millis.get() + millis);
    }
}

impl TimeSource for ManualClock {
    fn now_millis(&self) -> f64 {
        self.millis.get()
    }
}

/// Frame counter averaged over one-second windows
#[derive(Debug)]
pub struct FrameStats {
    last_tick: Instant,
    frame_count: u32,
    elapsed: f32,
    fps: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frame_count: 0,
            elapsed: 0.0,
            fps: 0.0,
        }
    }

    /// Count a frame. Returns the delta in seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.record(delta);
        delta
    }

    /// Count a frame that took `delta` seconds
    pub fn record(&mut self, delta: f32) {
        self.frame_count += 1;
        self.elapsed += delta;

        if self.elapsed >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.elapsed;
            log::debug!("FPS: {:.1}", self.fps);
            self.frame_count = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
