//! Focus transition state machine
//!
//! A request captures the camera's current position, disables free orbit
//! control and schedules three ramps on one timeline:
//!
//! ```text
//! request     fade end = move start                         move end
//!    |--fade in--|--------------camera move------------------|
//!                |------lead------|----overlay fade out---|slack
//! ```
//!
//! `advance(now)` samples the ramps, so a session is a pure function of its
//! request time and the timestamp. A new request overwrites the session in
//! place; there is never more than one set of ramps writing to the camera.

use crate::core::{CameraConfig, TransitionConfig};
use crate::foundation::math::{utils, Vec3};
use crate::foundation::time::millis_to_secs;
use crate::interaction::{EntityId, InteractiveEntity};
use crate::metadata::MetadataTable;
use crate::render::{Camera, OrbitController};
use crate::spatial::SpatialQuery;
use crate::tour::TourSession;
use crate::transition::Ramp;
use crate::ui::UiSurface;

/// Phase of the focus state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// No transition in flight
    Idle,
    /// Overlay fading in, camera holding still
    FadingIn,
    /// Camera gliding to its destination behind a full overlay
    Moving,
    /// Camera still gliding while the overlay lifts
    FadingOut,
}

/// What a transition does on completion
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionKind {
    /// Frame an entity, then show its description
    Focus {
        /// Entity being framed
        entity: EntityId,
        /// Panel title
        title: String,
        /// Panel body
        description: String,
    },
    /// Glide back to the overview and clear the selection
    ReturnToDefault,
}

/// Destination of a transition, computed when the request arrives
#[derive(Debug, Clone, PartialEq)]
pub struct FocusPlan {
    /// Completion behavior
    pub kind: TransitionKind,
    /// Point the camera looks at while moving and after arrival
    pub look_at: Vec3,
    /// Final camera position
    pub camera_target: Vec3,
    /// Length of the camera move in seconds
    pub move_duration: f64,
}

/// One in-flight camera move
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSession {
    kind: TransitionKind,
    phase: TransitionPhase,
    start_time: f64,
    source_camera_pos: Vec3,
    target_camera_pos: Vec3,
    look_at_target: Vec3,
    overlay_opacity: f32,
    fade_in: Ramp<f32>,
    camera_move: Ramp<Vec3>,
    fade_out: Ramp<f32>,
}

impl TransitionSession {
    /// Completion behavior of this session
    pub fn kind(&self) -> &TransitionKind {
        &self.kind
    }

    /// Phase as of the last `advance`
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Time the request arrived
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Camera position when the request arrived
    pub fn source_camera_pos(&self) -> Vec3 {
        self.source_camera_pos
    }

    /// Camera position on completion
    pub fn target_camera_pos(&self) -> Vec3 {
        self.target_camera_pos
    }

    /// Look-at point during the move and after arrival
    pub fn look_at_target(&self) -> Vec3 {
        self.look_at_target
    }

    /// Overlay opacity as of the last `advance`
    pub fn overlay_opacity(&self) -> f32 {
        self.overlay_opacity
    }

    /// Time at which the session completes
    pub fn end_time(&self) -> f64 {
        self.camera_move.end().max(self.fade_out.end())
    }

    fn phase_at(&self, now: f64) -> TransitionPhase {
        if now < self.fade_in.end() {
            TransitionPhase::FadingIn
        } else if now < self.fade_out.start {
            TransitionPhase::Moving
        } else {
            TransitionPhase::FadingOut
        }
    }
}

/// Result of one `advance` step
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionProgress {
    /// Nothing in flight
    Idle,
    /// Still running in the given phase
    Running(TransitionPhase),
    /// Finished during this step
    Completed(TransitionKind),
}

/// Mutable view state a transition drives
pub struct ViewContext<'a> {
    /// Scene camera
    pub camera: &'a mut Camera,
    /// Free orbit control
    pub orbit: &'a mut OrbitController,
    /// Panel, overlay and affordance widgets
    pub ui: &'a mut dyn UiSurface,
}

/// Drives focus and return-to-overview camera transitions
#[derive(Debug, Clone)]
pub struct FocusTransitionController {
    config: TransitionConfig,
    default_position: Vec3,
    default_look_at: Vec3,
}

impl FocusTransitionController {
    /// Create a controller returning to the overview pose of `camera`
    pub fn new(config: TransitionConfig, camera: &CameraConfig) -> Self {
        Self {
            config,
            default_position: camera.default_position,
            default_look_at: camera.default_look_at,
        }
    }

    /// Timing configuration
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Compute where the camera goes to frame `entity`
    ///
    /// Uses the entity's authored offset, then the curated metadata offset,
    /// then an offset derived from the world bounds. Degenerate or missing
    /// bounds frame the entity origin with whatever offset is authored, or
    /// none.
    pub fn plan_focus(
        &self,
        entity: &InteractiveEntity,
        metadata: &MetadataTable,
        query: &dyn SpatialQuery,
    ) -> FocusPlan {
        let info = metadata.resolve(entity.id.as_str());
        if !info.curated {
            log::debug!("No metadata for '{}', using placeholder text", entity.id);
        }
        let authored = entity.view_offset.or(info.camera_offset);

        let bounds = query
            .world_bounds(entity.node)
            .filter(|bounds| !bounds.is_degenerate());
        let (center, offset) = match bounds {
            Some(bounds) => {
                let center = bounds.center();
                let offset = authored.unwrap_or_else(|| self.derived_offset(center, bounds.size()));
                (center, offset)
            }
            None => {
                log::warn!("Degenerate bounds for '{}', framing its origin", entity.id);
                let origin = query.world_origin(entity.node).unwrap_or_else(Vec3::zeros);
                (origin, authored.unwrap_or_else(Vec3::zeros))
            }
        };

        FocusPlan {
            kind: TransitionKind::Focus {
                entity: entity.id.clone(),
                title: info.display_name,
                description: info.description,
            },
            look_at: center,
            camera_target: center + offset,
            move_duration: millis_to_secs(self.config.move_duration_ms),
        }
    }

    /// Plan for gliding back to the overview pose
    pub fn plan_return(&self) -> FocusPlan {
        FocusPlan {
            kind: TransitionKind::ReturnToDefault,
            look_at: self.default_look_at,
            camera_target: self.default_position,
            move_duration: millis_to_secs(self.config.return_move_duration_ms),
        }
    }

    /// Offset away from the world origin scaled by the bounds size
    pub fn derived_offset(&self, center: Vec3, size: Vec3) -> Vec3 {
        let direction = utils::try_normalize(center).unwrap_or_else(Vec3::z);
        direction * size.max() * self.config.derived_offset_scale
            + Vec3::new(0.0, self.config.derived_offset_lift * size.y, 0.0)
    }

    /// Start framing `entity`, superseding any transition in flight
    pub fn request_focus(
        &self,
        session: &mut TourSession,
        view: &mut ViewContext<'_>,
        entity: &InteractiveEntity,
        metadata: &MetadataTable,
        query: &dyn SpatialQuery,
        now: f64,
    ) {
        let plan = self.plan_focus(entity, metadata, query);
        log::info!("Focus requested on '{}'", entity.id);
        session.selected = Some(entity.id.clone());
        self.begin(session, view, plan, now);
    }

    /// Start gliding back to the overview, superseding any transition in flight
    pub fn return_to_default(&self, session: &mut TourSession, view: &mut ViewContext<'_>, now: f64) {
        log::info!("Returning to overview");
        self.begin(session, view, self.plan_return(), now);
    }

    /// Start a transition towards `plan` from the camera's current position
    pub fn begin(&self, session: &mut TourSession, view: &mut ViewContext<'_>, plan: FocusPlan, now: f64) {
        let start_opacity = match session.transition.take() {
            Some(previous) => {
                log::debug!("Superseding {:?} transition", previous.phase);
                previous.overlay_opacity
            }
            None => 0.0,
        };

        view.orbit.set_enabled(false);

        let easing = self.config.easing;
        let fade = millis_to_secs(self.config.fade_duration_ms);
        let slack = millis_to_secs(self.config.fade_slack_ms);
        let max_opacity = self.config.max_overlay_opacity;
        let move_start = now + fade;
        let lead = (plan.move_duration - fade - slack).max(0.0);
        let source = view.camera.position;

        session.transition = Some(TransitionSession {
            kind: plan.kind,
            phase: TransitionPhase::FadingIn,
            start_time: now,
            source_camera_pos: source,
            target_camera_pos: plan.camera_target,
            look_at_target: plan.look_at,
            overlay_opacity: start_opacity,
            fade_in: Ramp::new(start_opacity, max_opacity, now, fade, easing),
            camera_move: Ramp::new(source, plan.camera_target, move_start, plan.move_duration, easing),
            fade_out: Ramp::new(max_opacity, 0.0, move_start + lead, fade, easing),
        });
        view.ui.set_overlay_opacity(start_opacity);
    }

    /// Step the active transition to `now`
    pub fn advance(&self, session: &mut TourSession, view: &mut ViewContext<'_>, now: f64) -> TransitionProgress {
        let Some(active) = session.transition.as_mut() else {
            return TransitionProgress::Idle;
        };

        if now >= active.end_time() {
            let Some(finished) = session.transition.take() else {
                return TransitionProgress::Idle;
            };
            return self.complete(session, view, finished);
        }

        let phase = active.phase_at(now);
        if phase != active.phase {
            log::debug!("Transition phase {:?} -> {:?}", active.phase, phase);
            active.phase = phase;
        }

        active.overlay_opacity = match phase {
            TransitionPhase::FadingIn => active.fade_in.sample(now),
            _ => active.fade_out.sample(now),
        };
        view.ui.set_overlay_opacity(active.overlay_opacity);

        if phase != TransitionPhase::FadingIn {
            let position = active.camera_move.sample(now);
            view.camera.set_position(position);
            view.camera.set_target(active.look_at_target);
            log::trace!("Transition camera step to {:?}", position);
        }

        TransitionProgress::Running(phase)
    }

    fn complete(
        &self,
        session: &mut TourSession,
        view: &mut ViewContext<'_>,
        finished: TransitionSession,
    ) -> TransitionProgress {
        view.camera.set_position(finished.target_camera_pos);
        view.camera.set_target(finished.look_at_target);
        view.ui.set_overlay_opacity(0.0);
        view.orbit.set_target(finished.look_at_target);
        view.orbit.set_enabled(true);

        match &finished.kind {
            TransitionKind::Focus {
                entity,
                title,
                description,
            } => {
                view.ui.show_panel(title, description);
                view.ui.set_return_visible(true);
                log::info!("Focused '{}'", entity);
            }
            TransitionKind::ReturnToDefault => {
                view.ui.hide_panel();
                view.ui.set_return_visible(false);
                session.selected = None;
                log::info!("Returned to overview");
            }
        }

        TransitionProgress::Completed(finished.kind)
    }
}
