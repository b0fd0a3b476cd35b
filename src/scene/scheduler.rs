use std::time::Instant;

/// One display refresh as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub frame: u64,
    pub elapsed_ms: f64,
    pub delta_ms: f64,
}

/// Turns host frame instants into wall-clock time since start. Frame counts
/// are reported but never used to derive time.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    started: Instant,
    last: Instant,
    frames: u64,
}

impl FrameScheduler {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            last: started,
            frames: 0,
        }
    }

    pub fn tick(&mut self, now: Instant) -> FrameTick {
        let elapsed = now.saturating_duration_since(self.started);
        let delta = now.saturating_duration_since(self.last);
        self.last = now.max(self.last);
        self.frames = self.frames.saturating_add(1);
        FrameTick {
            frame: self.frames,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            delta_ms: delta.as_secs_f64() * 1000.0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
