//! Focus transitions: timed camera moves behind a fading overlay
//!
//! A transition fades an obstructing overlay in, glides the camera to its
//! destination while the overlay lifts again, then hands control back to
//! the user. All timing keys off caller-supplied timestamps, never off the
//! number of frames.

mod controller;
mod easing;
mod ramp;

pub use controller::{
    FocusPlan, FocusTransitionController, TransitionKind, TransitionPhase, TransitionProgress,
    TransitionSession, ViewContext,
};
pub use easing::Easing;
pub use ramp::{Lerp, Ramp};
