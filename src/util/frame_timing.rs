//! Frame delta time measurement.

use web_time::{Duration, Instant};

/// Measured frame delta time with a smoothed FPS readout.
///
/// The display refresh rate is never assumed: every frame reports the
/// wall-clock time since the previous one.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Mark the start of a new frame and return the time elapsed since the
    /// previous one.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed);
        elapsed
    }

    fn record(&mut self, elapsed: Duration) {
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_frame_keeps_fps() {
        let mut timing = FrameTiming::new();
        timing.record(Duration::ZERO);
        assert_eq!(timing.fps(), 60.0);
    }

    #[test]
    fn fps_moves_toward_measured_rate() {
        let mut timing = FrameTiming::new();
        for _ in 0..200 {
            timing.record(Duration::from_millis(20));
        }
        assert!((timing.fps() - 50.0).abs() < 0.5);
    }
}
