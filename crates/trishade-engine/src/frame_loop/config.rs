use crate::paint::Color;
use crate::time::DEFAULT_SAMPLE_INTERVAL;

/// Which registry slots are drawn each frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DrawMode {
    /// Only the active slot.
    #[default]
    ActiveOnly,
    /// Every populated slot in index order, each with its own geometry.
    AllSlots,
}

/// What a failed reload does to the loop.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ReloadPolicy {
    /// Log the failure and keep drawing with the previous program.
    #[default]
    KeepPrevious,
    /// Stop the loop and return the error.
    Abort,
}

/// Frame loop configuration.
#[derive(Debug, Clone)]
pub struct FrameLoopConfig {
    pub clear_color: Color,
    /// Seconds between throughput samples.
    pub sample_interval: f64,
    pub draw_mode: DrawMode,
    pub reload_policy: ReloadPolicy,
    /// `input_color` for slots that have not been given one.
    pub initial_color: Color,
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::new(0.6, 0.6, 0.8, 1.0),
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            draw_mode: DrawMode::ActiveOnly,
            reload_policy: ReloadPolicy::KeepPrevious,
            initial_color: Color::white(),
        }
    }
}
