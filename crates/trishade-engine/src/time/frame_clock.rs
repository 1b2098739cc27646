use std::time::Instant;

/// Monotonic seconds since the window was created.
///
/// The time source for throughput sampling.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since the clock was created.
    pub fn seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
