/// Default throughput sampling interval, in seconds.
pub const DEFAULT_SAMPLE_INTERVAL: f64 = 0.25;

/// Shortest accepted sampling interval. Shorter (or non-finite) intervals are
/// raised to this.
pub const MIN_SAMPLE_INTERVAL: f64 = 0.001;

/// One throughput measurement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FpsSample {
    pub fps: f64,
    /// Frames counted in the sample.
    pub frames: u32,
    /// Seconds covered by the sample.
    pub elapsed: f64,
}

/// Counts frames and periodically turns the count into a frames-per-second value.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    previous_sample_time: f64,
    frame_count: u32,
    interval: f64,
}

impl FrameTimer {
    /// `start` is the time the first sample is measured from.
    pub fn new(interval: f64, start: f64) -> Self {
        let clamped = if interval.is_finite() {
            interval.max(MIN_SAMPLE_INTERVAL)
        } else {
            DEFAULT_SAMPLE_INTERVAL
        };
        if clamped != interval {
            log::warn!("fps sample interval {interval} is invalid, using {clamped}");
        }
        Self {
            previous_sample_time: start,
            frame_count: 0,
            interval: clamped,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Counts one frame at time `now`.
    ///
    /// Once at least one interval has passed since the previous sample, returns
    /// `frame_count / elapsed` and starts a new sample at `now`.
    pub fn tick(&mut self, now: f64) -> Option<FpsSample> {
        self.frame_count += 1;

        let elapsed = now - self.previous_sample_time;
        if elapsed < self.interval {
            return None;
        }

        let sample = FpsSample {
            fps: self.frame_count as f64 / elapsed,
            frames: self.frame_count,
            elapsed,
        };

        self.previous_sample_time = now;
        self.frame_count = 0;

        Some(sample)
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_INTERVAL, 0.0)
    }
}

/// Window title carrying the latest throughput value.
pub fn fps_title(base: &str, fps: f64) -> String {
    format!("{base} fps: {fps:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_frames_over_interval() {
        let mut timer = FrameTimer::new(0.25, 0.0);
        let n = 8;
        let step = 0.25 / n as f64;

        let mut sample = None;
        for i in 1..=n {
            sample = timer.tick(step * i as f64);
            if i < n {
                assert!(sample.is_none(), "sampled early at frame {i}");
            }
        }

        let sample = sample.unwrap();
        assert_eq!(sample.frames, n);
        assert!((sample.fps - n as f64 / 0.25).abs() < 1e-6);
    }

    #[test]
    fn resets_after_each_sample() {
        let mut timer = FrameTimer::new(0.25, 0.0);
        assert!(timer.tick(0.3).is_some());
        assert_eq!(timer.frame_count(), 0);

        assert!(timer.tick(0.4).is_none());
        assert_eq!(timer.frame_count(), 1);

        let s = timer.tick(0.55).unwrap();
        assert_eq!(s.frames, 2);
        assert!((s.elapsed - 0.25).abs() < 1e-9);
    }

    #[test]
    fn respects_start_time() {
        let mut timer = FrameTimer::new(1.0, 100.0);
        assert!(timer.tick(100.5).is_none());
        let s = timer.tick(101.0).unwrap();
        assert!((s.fps - 2.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_interval_is_clamped() {
        assert_eq!(FrameTimer::new(0.0, 0.0).interval(), MIN_SAMPLE_INTERVAL);
        assert_eq!(FrameTimer::new(-1.0, 0.0).interval(), MIN_SAMPLE_INTERVAL);
        assert_eq!(FrameTimer::new(f64::NAN, 0.0).interval(), DEFAULT_SAMPLE_INTERVAL);

        // A zero interval must not divide by a zero elapsed time.
        let mut timer = FrameTimer::new(0.0, 1.0);
        assert!(timer.tick(1.0).is_none());
        let s = timer.tick(1.5).unwrap();
        assert!(s.fps.is_finite());
        assert_eq!(s.frames, 2);
    }

    #[test]
    fn title_uses_two_decimals() {
        assert_eq!(fps_title("trishade", 59.99612), "trishade fps: 60.00");
        assert_eq!(fps_title("x", 12.3), "x fps: 12.30");
    }
}
