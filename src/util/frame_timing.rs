use web_time::Instant;

/// Seconds between FPS log lines.
const REPORT_INTERVAL: f32 = 2.0;

/// Frame timing with smoothed FPS and periodic log output.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Seconds accumulated since the last FPS log line
    since_report: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Start timing from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    // 5% new value, 95% old value
            since_report: 0.0,
        }
    }

    /// Mark the start of a frame. Returns seconds since the previous call.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        dt
    }

    /// Fold a frame duration into the smoothed FPS.
    pub fn record(&mut self, frame_time: f32) {
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        self.since_report += frame_time.max(0.0);
        if self.since_report >= REPORT_INTERVAL {
            self.since_report = 0.0;
            log::debug!("{:.1} fps", self.smoothed_fps);
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
    fn converges_toward_steady_rate() {
        let mut timing = FrameTiming::new();
        for _ in 0..500 {
            timing.record(1.0 / 30.0);
        }
        assert!((timing.fps() - 30.0).abs() < 0.1);
    }

    #[test]
    fn zero_duration_keeps_estimate() {
        let mut timing = FrameTiming::new();
        timing.record(0.0);
        assert_eq!(timing.fps(), 60.0);
    }
}
