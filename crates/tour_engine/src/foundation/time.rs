//! Time management utilities
//!
//! Every timed operation in the viewer takes an explicit `now` in seconds.
//! `FrameClock` is the only place that reads the wall clock, so tests can
//! drive transitions and agents with synthetic timestamps instead.

use std::time::Instant;

/// Wall-clock source for frame timestamps
pub struct FrameClock {
    start: Instant,
    last_frame: f64,
    delta_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock whose zero is the moment of construction
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_frame: 0.0,
            delta_time: 0.0,
            frame_count: 0,
        }
    }
    
    /// Seconds since the clock was created
    pub fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Advance one frame and return the frame timestamp (seconds since start)
    pub fn tick(&mut self) -> f64 {
        let now = self.now();
        self.delta_time = (now - self.last_frame) as f32;
        self.last_frame = now;
        self.frame_count += 1;
        now
    }
    
    /// Get the time between the last two ticks in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }
    
    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Convert a millisecond configuration value to seconds
pub fn millis_to_secs(millis: u32) -> f64 {
    f64::from(millis) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_is_monotonic() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        let second = clock.tick();
        assert!(second >= first);
        assert_eq!(clock.frame_count(), 2);
        assert!(clock.delta_time() >= 0.0);
    }

    #[test]
    fn test_millis_to_secs() {
        assert!((millis_to_secs(1500) - 1.5).abs() < f64::EPSILON);
    }
}
