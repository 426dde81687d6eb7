//! Session state and the per-frame driver tying every component together

mod campus;
mod session;

pub use campus::{AgentPose, CampusTour, FrameSnapshot};
pub use session::TourSession;
