//! Explicit mutable session context

use crate::interaction::EntityId;
use crate::transition::{TransitionPhase, TransitionSession};

/// Mutable state shared by the resolver, the controller and the driver
///
/// Passed into every call that reads or changes it; nothing else holds it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourSession {
    /// Transition in flight, if any
    pub transition: Option<TransitionSession>,
    /// Entity framed by the last focus request
    pub selected: Option<EntityId>,
    /// Entity under the pointer as of the last hover query
    pub hovered: Option<EntityId>,
}

impl TourSession {
    /// Fresh session: idle, nothing selected or hovered
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase of the active transition, `Idle` when none
    pub fn phase(&self) -> TransitionPhase {
        self.transition
            .as_ref()
            .map_or(TransitionPhase::Idle, TransitionSession::phase)
    }

    /// Whether a transition is in flight
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether pointer hover and click may pick entities
    pub fn picking_armed(&self) -> bool {
        self.transition.is_none() && self.selected.is_none()
    }
}
