//! Frame rate gate for live video loops

use crate::config::ThrottleConfig;
use std::time::{Duration, Instant};

/// Lets through at most `max_fps` frames per second.
///
/// Frames arriving inside the cooldown are dropped, not queued, so the next
/// processed frame is always the most recent one.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameThrottle {
    /// `max_fps == 0` processes every frame
    pub fn new(max_fps: u32) -> Self {
        let interval = if max_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / f64::from(max_fps))
        };
        Self { interval, last: None }
    }

    /// Create a throttle from the `throttle` config section
    pub fn from_config(config: &ThrottleConfig) -> Self {
        Self::new(config.max_fps)
    }

    /// Minimum spacing between processed frames
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the frame arriving at `now` should be processed
    pub fn should_process(&mut self, now: Instant) -> bool {
        let ready = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if ready {
            self.last = Some(now);
        }
        ready
    }

    /// Forget the last processed frame
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::from_config(&ThrottleConfig::default())
    }
}
