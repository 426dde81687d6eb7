//! Timed value ramps
//!
//! A ramp is pure data: `sample(now)` is a function of the ramp and the
//! timestamp only, so two ramps advanced in the same tick cannot interfere
//! and overwriting a ramp is all it takes to cancel it.

use crate::foundation::math::{utils, Vec3};
use crate::transition::Easing;

/// Values a [`Ramp`] can interpolate
pub trait Lerp: Copy {
    /// Interpolate from `self` to `to` by `t` in [0, 1]
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        utils::lerp(self, to, t)
    }
}

impl Lerp for Vec3 {
    fn lerp(self, to: Self, t: f32) -> Self {
        utils::lerp_vec3(self, to, t)
    }
}

/// Eased interpolation between two values over a time window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp<T: Lerp> {
    /// Value at and before `start`
    pub from: T,
    /// Value at and after `start + duration`
    pub to: T,
    /// Start of the window in seconds
    pub start: f64,
    /// Length of the window in seconds
    pub duration: f64,
    /// Curve applied to normalized time
    pub easing: Easing,
}

impl<T: Lerp> Ramp<T> {
    /// Create a ramp over `[start, start + duration]`
    pub fn new(from: T, to: T, start: f64, duration: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// End of the window in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Normalized, un-eased progress at `now`
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return if now >= self.start { 1.0 } else { 0.0 };
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Value of the ramp at `now`
    pub fn sample(&self, now: f64) -> T {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(progress))
    }

    /// Whether the window has fully elapsed at `now`
    pub fn is_complete(&self, now: f64) -> bool {
        now >= self.end()
    }
}
