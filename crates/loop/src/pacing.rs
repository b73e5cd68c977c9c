use std::thread;
use std::time::{Duration, Instant};

/// Caps the frame rate by sleeping out the remainder of each frame budget.
pub struct FramePacer {
    frame_budget: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(max_fps: u32) -> Self {
        let max_fps = max_fps.max(1);
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / max_fps as f64),
            frame_start: Instant::now(),
        }
    }

    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    pub fn pace(&self) {
        let spent = self.frame_start.elapsed();
        if let Some(remaining) = self.frame_budget.checked_sub(spent) {
            thread::sleep(remaining);
        }
    }
}
