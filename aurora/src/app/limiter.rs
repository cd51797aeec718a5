use std::time::{Duration, Instant};

/// Frame rate cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimiter {
    frame_time: Option<Duration>,
}

impl FrameLimiter {
    /// `max_fps` of 0 disables the cap.
    pub fn new(max_fps: u32) -> Self {
        let mut limiter = Self { frame_time: None };
        limiter.set_max_fps(max_fps);
        limiter
    }

    pub fn set_max_fps(&mut self, max_fps: u32) {
        self.frame_time = (max_fps > 0).then(|| Duration::from_secs_f64(1.0 / max_fps as f64));
        log::info!(
            "Maximum FPS set to {} - using a frame time of {:.2} ms",
            max_fps,
            self.frame_time.map_or(0.0, |t| t.as_secs_f64() * 1000.0)
        );
    }

    pub fn frame_time(&self) -> Option<Duration> {
        self.frame_time
    }

    /// Time left in the frame budget after spending `elapsed`.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.frame_time?
            .checked_sub(elapsed)
            .filter(|left| !left.is_zero())
    }

    /// Sleep out the rest of the frame that started at `frame_start`.
    /// Returns how long it slept.
    pub fn wait(&self, frame_start: Instant) -> Option<Duration> {
        let left = self.remaining(frame_start.elapsed())?;
        std::thread::sleep(left);
        Some(left)
    }
}
