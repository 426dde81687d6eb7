//! Easing curves

use serde::{Deserialize, Serialize};

/// Easing curve mapping normalized time to normalized progress
///
/// Every curve maps 0 to 0 and 1 to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Quadratic ease-in/ease-out
    EaseInOutQuad,
    /// Cubic ease-in/ease-out
    #[default]
    EaseInOutCubic,
    /// Sinusoidal ease-in/ease-out
    EaseInOutSine,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::EaseInOutSine => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}
