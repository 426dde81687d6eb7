//! Campus tour driver
//!
//! Owns the scene, every core component and the session context, routes
//! host input events to them and runs one synchronous frame step:
//! simulator, transition, orbit control, agent transform sync.

use crate::core::TourConfig;
use crate::error::TourError;
use crate::flock::FlockSimulator;
use crate::foundation::math::{constants, Mat4, Vec3};
use crate::input::PointerState;
use crate::interaction::{EntityId, EntityRegistry, InteractionResolver, InteractiveEntity};
use crate::metadata::MetadataTable;
use crate::render::{Camera, OrbitController};
use crate::scene::SceneGraph;
use crate::tour::TourSession;
use crate::transition::{
    FocusTransitionController, TransitionKind, TransitionPhase, TransitionProgress, ViewContext,
};
use crate::ui::{populate_entity_list, CursorStyle, UiSurface};

/// Pose of one agent handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct AgentPose {
    /// Agent id
    pub id: String,
    /// World position
    pub position: Vec3,
    /// Yaw about +Y
    pub heading: f32,
}

/// Everything the external renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Camera view matrix
    pub view: Mat4,
    /// Camera projection matrix
    pub projection: Mat4,
    /// Camera position
    pub camera_position: Vec3,
    /// Overlay opacity
    pub overlay_opacity: f32,
    /// Transition phase after this frame
    pub phase: TransitionPhase,
    /// Transition that completed during this frame
    pub completed: Option<TransitionKind>,
    /// Agent poses after this frame
    pub agents: Vec<AgentPose>,
}

/// A running campus tour over a host UI surface
pub struct CampusTour<U: UiSurface> {
    config: TourConfig,
    scene: SceneGraph,
    resolver: InteractionResolver,
    metadata: MetadataTable,
    controller: FocusTransitionController,
    simulator: FlockSimulator,
    camera: Camera,
    orbit: OrbitController,
    pointer: PointerState,
    ui: U,
    session: TourSession,
    start_time: f64,
}

impl<U: UiSurface> CampusTour<U> {
    /// Set up a tour over a loaded scene
    ///
    /// Discovers interactive entities and agents, places the camera at the
    /// overview pose and fills the building list. `start_time` is the
    /// timestamp agent motion is measured from.
    pub fn new(
        config: TourConfig,
        scene: SceneGraph,
        metadata: MetadataTable,
        mut ui: U,
        window: (u32, u32),
        start_time: f64,
    ) -> Result<Self, TourError> {
        config.validate()?;
        if scene.is_empty() {
            return Err(TourError::Scene("scene has no nodes".to_string()));
        }

        let registry = EntityRegistry::discover(&scene, &config.scene.interactive_naming);
        if registry.is_empty() {
            log::warn!("No interactive entities match {:?}", config.scene.interactive_naming);
        }
        log::info!(
            "Registered {} interactive entities ({} with metadata)",
            registry.len(),
            registry.iter().filter(|e| metadata.get(e.id.as_str()).is_some()).count()
        );
        populate_entity_list(&mut ui, &registry, &metadata);

        let simulator = FlockSimulator::discover(&scene, &config.flock);
        let pointer = PointerState::new(window.0, window.1);
        let camera = Camera::from_config(&config.camera, pointer.aspect_ratio());
        let orbit = OrbitController::new(config.camera.default_look_at, &config.camera);
        let controller = FocusTransitionController::new(config.transition.clone(), &config.camera);

        let mut tour = Self {
            config,
            scene,
            resolver: InteractionResolver::new(registry),
            metadata,
            controller,
            simulator,
            camera,
            orbit,
            pointer,
            ui,
            session: TourSession::new(),
            start_time,
        };
        tour.sync_agents();
        Ok(tour)
    }

    /// Configuration in use
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Scene with agent transforms as of the last frame
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Registered interactive entities
    pub fn registry(&self) -> &EntityRegistry {
        self.resolver.registry()
    }

    /// Scene camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Free orbit control
    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    /// Ambient agent simulation
    pub fn simulator(&self) -> &FlockSimulator {
        &self.simulator
    }

    /// Session context
    pub fn session(&self) -> &TourSession {
        &self.session
    }

    /// Host UI surface
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Pointer moved; updates the hover state and cursor
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Option<EntityId> {
        self.pointer.update_position(x, y);
        if !self.session.picking_armed() {
            self.session.hovered = None;
            self.ui.set_cursor(CursorStyle::Default);
            return None;
        }

        let hover = self
            .resolver
            .hover(self.pointer.screen_to_ndc(), &self.camera, &self.scene);
        self.ui.set_cursor(hover.cursor);
        self.session.hovered.clone_from(&hover.entity);
        hover.entity
    }

    /// Primary button clicked; focuses the entity under the pointer
    ///
    /// Ignored while a transition runs or an entity is selected.
    pub fn on_click(&mut self, x: f64, y: f64, now: f64) -> Option<EntityId> {
        self.pointer.update_position(x, y);
        if !self.session.picking_armed() {
            log::debug!("Click ignored, picking is disarmed");
            return None;
        }

        let entity = self
            .resolver
            .select(self.pointer.screen_to_ndc(), &self.camera, &self.scene)?;
        let id = entity.id.clone();
        Self::focus(
            &self.controller,
            &mut self.session,
            &mut ViewContext {
                camera: &mut self.camera,
                orbit: &mut self.orbit,
                ui: &mut self.ui,
            },
            entity,
            &self.metadata,
            &self.scene,
            now,
        );
        Some(id)
    }

    /// Building list selection; always accepted, even mid-transition
    pub fn select_by_id(&mut self, id: &str, now: f64) -> Result<(), TourError> {
        let entity = self
            .resolver
            .registry()
            .get(&EntityId::from(id))
            .ok_or_else(|| TourError::UnknownEntity(id.to_string()))?;
        Self::focus(
            &self.controller,
            &mut self.session,
            &mut ViewContext {
                camera: &mut self.camera,
                orbit: &mut self.orbit,
                ui: &mut self.ui,
            },
            entity,
            &self.metadata,
            &self.scene,
            now,
        );
        Ok(())
    }

    /// Return affordance pressed; glides back to the overview
    pub fn return_to_default(&mut self, now: f64) {
        let mut view = ViewContext {
            camera: &mut self.camera,
            orbit: &mut self.orbit,
            ui: &mut self.ui,
        };
        self.controller.return_to_default(&mut self.session, &mut view, now);
    }

    /// Window resized
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.pointer.update_window_size(width, height);
        self.camera.set_aspect_ratio(self.pointer.aspect_ratio());
    }

    /// Pointer dragged by a pixel delta; orbits the camera when allowed
    pub fn on_drag(&mut self, dx: f32, dy: f32) {
        let height = self.pointer.window_height.max(1) as f32;
        self.orbit.rotate_left(-constants::TAU * dx / height);
        self.orbit.rotate_up(-constants::TAU * dy / height);
    }

    /// Wheel zoom; factors above 1 move closer
    pub fn on_zoom(&mut self, factor: f32) {
        self.orbit.dolly_in(factor);
    }

    /// Run one frame at timestamp `now`
    pub fn frame(&mut self, now: f64) -> FrameSnapshot {
        self.simulator.advance((now - self.start_time).max(0.0));

        let progress = {
            let mut view = ViewContext {
                camera: &mut self.camera,
                orbit: &mut self.orbit,
                ui: &mut self.ui,
            };
            self.controller.advance(&mut self.session, &mut view, now)
        };
        self.orbit.update(&mut self.camera);
        self.sync_agents();

        FrameSnapshot {
            view: self.camera.get_view_matrix(),
            projection: self.camera.get_projection_matrix(),
            camera_position: self.camera.position,
            overlay_opacity: self
                .session
                .transition
                .as_ref()
                .map_or(0.0, |active| active.overlay_opacity()),
            phase: self.session.phase(),
            completed: match progress {
                TransitionProgress::Completed(kind) => Some(kind),
                _ => None,
            },
            agents: self
                .simulator
                .agents()
                .iter()
                .map(|agent| AgentPose {
                    id: agent.id.clone(),
                    position: agent.position,
                    heading: agent.heading,
                })
                .collect(),
        }
    }

    fn focus(
        controller: &FocusTransitionController,
        session: &mut TourSession,
        view: &mut ViewContext<'_>,
        entity: &InteractiveEntity,
        metadata: &MetadataTable,
        scene: &SceneGraph,
        now: f64,
    ) {
        controller.request_focus(session, view, entity, metadata, scene, now);
        session.hovered = None;
        view.ui.set_cursor(CursorStyle::Default);
    }

    fn sync_agents(&mut self) {
        for agent in self.simulator.agents() {
            let Some(node) = agent.node.and_then(|key| self.scene.node_mut(key)) else {
                continue;
            };
            let pose = agent.transform();
            node.local.position = pose.position;
            node.local.rotation = pose.rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::metadata::BuildingInfo;
    use crate::scene::Geometry;
    use crate::spatial::AABB;
    use crate::ui::HeadlessUi;

    const WINDOW: (u32, u32) = (800, 600);
    const CENTER: (f64, f64) = (400.0, 300.0);
    const DT: f64 = 1.0 / 60.0;

    fn campus() -> (SceneGraph, MetadataTable) {
        let mut scene = SceneGraph::new();
        scene.add_root(
            "圖書館",
            Transform::identity(),
            Some(Geometry::Box(AABB::from_center_extents(Vec3::zeros(), Vec3::new(20.0, 20.0, 20.0)))),
        );
        scene.add_root(
            "行政大樓",
            Transform::from_position(Vec3::new(60.0, 0.0, 0.0)),
            Some(Geometry::Box(AABB::from_center_extents(Vec3::zeros(), Vec3::new(5.0, 5.0, 5.0)))),
        );
        scene.add_root(
            "pond",
            Transform::from_position(Vec3::new(-60.0, 0.0, 60.0)),
            Some(Geometry::Box(AABB::from_center_extents(Vec3::zeros(), Vec3::new(15.0, 0.5, 15.0)))),
        );
        scene.add_root("duck_1", Transform::identity(), None);
        scene.add_root("duck_2", Transform::identity(), None);

        let mut metadata = MetadataTable::new();
        metadata.insert(
            "圖書館",
            BuildingInfo {
                display_name: "Library".to_string(),
                description: "Stacks and reading rooms.".to_string(),
                camera_offset: Some(Vec3::new(0.0, 30.0, 60.0)),
            },
        );
        (scene, metadata)
    }

    fn tour() -> CampusTour<HeadlessUi> {
        let (scene, metadata) = campus();
        CampusTour::new(TourConfig::default(), scene, metadata, HeadlessUi::new(), WINDOW, 0.0).unwrap()
    }

    fn run(tour: &mut CampusTour<HeadlessUi>, from: f64, to: f64) -> Vec<FrameSnapshot> {
        let mut frames = Vec::new();
        let mut now = from;
        while now < to {
            now += DT;
            frames.push(tour.frame(now));
        }
        frames
    }

    #[test]
    fn test_setup_discovers_entities_and_agents() {
        let tour = tour();
        assert_eq!(tour.registry().len(), 2);
        assert_eq!(tour.simulator().agents().len(), 2);
        assert_eq!(tour.simulator().center(), Vec3::new(-60.0, 0.0, 60.0));
        let labels: Vec<&str> = tour.ui().list.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, ["Library", "行政大樓"]);
        assert_eq!(tour.camera().position, Vec3::new(0.0, 50.0, 100.0));
        assert!(tour.orbit().is_enabled());
    }

    #[test]
    fn test_empty_scene_is_rejected() {
        let result = CampusTour::new(
            TourConfig::default(),
            SceneGraph::new(),
            MetadataTable::new(),
            HeadlessUi::new(),
            WINDOW,
            0.0,
        );
        assert!(matches!(result, Err(TourError::Scene(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let (scene, metadata) = campus();
        let mut config = TourConfig::default();
        config.transition.max_overlay_opacity = 2.0;
        let result = CampusTour::new(config, scene, metadata, HeadlessUi::new(), WINDOW, 0.0);
        assert!(matches!(result, Err(TourError::Config(_))));
    }

    #[test]
    fn test_hover_sets_cursor() {
        let mut tour = tour();
        assert_eq!(tour.on_pointer_move(CENTER.0, CENTER.1), Some(EntityId::from("圖書館")));
        assert_eq!(tour.ui().cursor, CursorStyle::Pointer);
        assert_eq!(tour.session().hovered, Some(EntityId::from("圖書館")));

        assert_eq!(tour.on_pointer_move(0.0, 0.0), None);
        assert_eq!(tour.ui().cursor, CursorStyle::Default);
        assert!(tour.session().hovered.is_none());
    }

    #[test]
    fn test_click_focus_and_return_cycle() {
        let mut tour = tour();
        assert_eq!(tour.on_click(CENTER.0, CENTER.1, 0.0), Some(EntityId::from("圖書館")));
        assert!(tour.session().is_transitioning());
        assert!(!tour.orbit().is_enabled());

        // Picking stays disarmed while the camera moves
        assert_eq!(tour.on_pointer_move(CENTER.0, CENTER.1), None);
        assert_eq!(tour.on_click(CENTER.0, CENTER.1, 0.1), None);

        let frames = run(&mut tour, 0.0, 2.0);
        assert!(frames
            .iter()
            .any(|frame| matches!(frame.completed, Some(TransitionKind::Focus { .. }))));
        assert_eq!(tour.session().phase(), TransitionPhase::Idle);
        assert_eq!(tour.camera().position, Vec3::new(0.0, 30.0, 60.0));
        assert_eq!(tour.camera().target, Vec3::zeros());
        assert_eq!(tour.ui().overlay_opacity, 0.0);
        assert!(tour.ui().panel_visible());
        assert!(tour.ui().return_visible);
        assert!(tour.orbit().is_enabled());

        // Still selected, so hover stays off until the user returns
        assert_eq!(tour.on_pointer_move(CENTER.0, CENTER.1), None);

        tour.return_to_default(2.0);
        run(&mut tour, 2.0, 5.0);
        assert_eq!(tour.camera().position, Vec3::new(0.0, 50.0, 100.0));
        assert!(!tour.ui().panel_visible());
        assert!(!tour.ui().return_visible);
        assert!(tour.session().selected.is_none());
        assert_eq!(tour.on_pointer_move(CENTER.0, CENTER.1), Some(EntityId::from("圖書館")));
    }

    #[test]
    fn test_click_resolves_at_click_position() {
        let mut tour = tour();
        assert_eq!(tour.on_pointer_move(0.0, 0.0), None);

        assert_eq!(tour.on_click(0.0, 0.0, 0.0), None);
        assert!(tour.session().selected.is_none());
        assert!(!tour.session().is_transitioning());

        // No hover at the click point first; the click alone picks
        assert_eq!(tour.on_click(CENTER.0, CENTER.1, 0.1), Some(EntityId::from("圖書館")));
        assert_eq!(tour.session().selected, Some(EntityId::from("圖書館")));
        assert!(tour.session().is_transitioning());
    }

    #[test]
    fn test_list_selection_supersedes_running_transition() {
        let mut tour = tour();
        tour.select_by_id("圖書館", 0.0).unwrap();
        run(&mut tour, 0.0, 1.0);
        tour.select_by_id("行政大樓", 1.0).unwrap();
        assert_eq!(tour.session().selected, Some(EntityId::from("行政大樓")));

        run(&mut tour, 1.0, 3.5);
        assert!(!tour.session().is_transitioning());
        let expected = tour
            .controller
            .plan_focus(
                tour.registry().get(&EntityId::from("行政大樓")).unwrap(),
                &tour.metadata,
                &tour.scene,
            )
            .camera_target;
        assert_eq!(tour.camera().position, expected);
        assert_eq!(tour.camera().target, Vec3::new(60.0, 0.0, 0.0));
        assert_eq!(
            tour.ui().panel.as_ref().map(|(title, _)| title.as_str()),
            Some("行政大樓")
        );
    }

    #[test]
    fn test_unknown_entity_is_an_error() {
        let mut tour = tour();
        let result = tour.select_by_id("體育館", 0.0);
        assert!(matches!(result, Err(TourError::UnknownEntity(id)) if id == "體育館"));
        assert!(!tour.session().is_transitioning());
    }

    #[test]
    fn test_frame_syncs_agents_into_scene() {
        let mut tour = tour();
        let before: Vec<Vec3> = tour.simulator().agents().iter().map(|a| a.position).collect();
        let snapshot = tour.frame(4.0);

        assert_eq!(snapshot.agents.len(), 2);
        assert_eq!(snapshot.phase, TransitionPhase::Idle);
        assert_eq!(snapshot.overlay_opacity, 0.0);
        for (pose, old) in snapshot.agents.iter().zip(before) {
            assert_ne!(pose.position, old);
            let key = tour.scene().find_by_name(&pose.id).unwrap();
            assert_eq!(tour.scene().node(key).unwrap().local.position, pose.position);
        }
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut tour = tour();
        tour.on_resize(1000, 500);
        assert!((tour.camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_drag_orbits_only_when_enabled() {
        let mut free = tour();
        free.on_drag(100.0, 0.0);
        run(&mut free, 0.0, 0.5);
        assert_ne!(free.camera().position, Vec3::new(0.0, 50.0, 100.0));

        let mut locked = tour();
        locked.select_by_id("圖書館", 0.0).unwrap();
        locked.on_drag(100.0, 0.0);
        run(&mut locked, 0.0, 0.2);
        assert_eq!(locked.camera().position, Vec3::new(0.0, 50.0, 100.0));
    }
}
