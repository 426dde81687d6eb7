//! # Unified Configuration System
//!
//! All tuning constants of the viewer live here, grouped per subsystem.
//! Every section has a `Default` matching the shipped tuning and every
//! field falls back to that default when absent from a config file.

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};
use crate::flock::RepulsionMode;
use crate::foundation::math::{constants, Vec3};
use crate::scene::NamingConvention;
use crate::transition::Easing;

/// # Tour Configuration
///
/// Top-level configuration for a campus tour session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Focus transition timings and framing
    pub transition: TransitionConfig,
    /// Ambient agent simulation
    pub flock: FlockConfig,
    /// Camera projection, overview pose and orbit control
    pub camera: CameraConfig,
    /// Scene discovery conventions
    pub scene: SceneConfig,
}

impl Config for TourConfig {}

impl TourConfig {
    /// Check ranges that would make the simulation or transitions meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.transition;
        if !(0.0..=1.0).contains(&t.max_overlay_opacity) {
            return Err(ConfigError::Invalid(format!(
                "max_overlay_opacity must be within [0, 1], got {}",
                t.max_overlay_opacity
            )));
        }
        if t.move_duration_ms == 0 || t.return_move_duration_ms == 0 {
            return Err(ConfigError::Invalid("move durations must be non-zero".to_string()));
        }

        let f = &self.flock;
        if f.safe_distance < 0.0 || f.repulsion_strength < 0.0 {
            return Err(ConfigError::Invalid(
                "safe_distance and repulsion_strength must be non-negative".to_string(),
            ));
        }
        if f.radius_range[0] <= 0.0 || f.radius_range[0] > f.radius_range[1] {
            return Err(ConfigError::Invalid(format!(
                "radius_range must be positive and ordered, got {:?}",
                f.radius_range
            )));
        }
        if f.speed_range[0] > f.speed_range[1] {
            return Err(ConfigError::Invalid(format!(
                "speed_range must be ordered, got {:?}",
                f.speed_range
            )));
        }

        let c = &self.camera;
        if c.near <= 0.0 || c.far <= c.near {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                c.near, c.far
            )));
        }
        Ok(())
    }
}

/// # Transition Configuration
///
/// Timings for the fade-out / move / fade-in camera focus sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Duration of each overlay fade in milliseconds
    pub fade_duration_ms: u32,
    /// Duration of the camera move when focusing an entity
    pub move_duration_ms: u32,
    /// Duration of the camera move when returning to the overview
    pub return_move_duration_ms: u32,
    /// Overlay opacity reached at the end of the fade-in
    pub max_overlay_opacity: f32,
    /// Gap between the end of the overlay fade-out and the camera arrival
    pub fade_slack_ms: u32,
    /// Derived offset distance as a multiple of the largest bounds dimension
    pub derived_offset_scale: f32,
    /// Derived offset vertical lift as a multiple of the bounds height
    pub derived_offset_lift: f32,
    /// Curve shared by the camera move and both overlay fades
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fade_duration_ms: 300,
            move_duration_ms: 1500,
            return_move_duration_ms: 2500,
            max_overlay_opacity: 0.7,
            fade_slack_ms: 100,
            derived_offset_scale: 2.5,
            derived_offset_lift: 0.7,
            easing: Easing::EaseInOutCubic,
        }
    }
}

/// # Flock Configuration
///
/// Tuning for the ambient agents circling the orbit center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    /// Separation below which two agents push each other apart
    pub safe_distance: f32,
    /// Fraction of the overlap converted into push distance
    pub repulsion_strength: f32,
    /// Constant height of the water surface the agents sit on
    pub surface_height: f32,
    /// Yaw added to the travel direction so the model faces forward
    pub heading_offset: f32,
    /// Inclusive range agents draw their orbit radius from
    pub radius_range: [f32; 2],
    /// Inclusive range agents draw their angular speed (rad/s) from
    pub speed_range: [f32; 2],
    /// Seed for the per-agent parameter draw
    pub seed: u64,
    /// Name of the scene node whose center becomes the orbit center
    pub landmark_name: String,
    /// Name prefix identifying agent nodes in the scene
    pub agent_prefix: String,
    /// How pairwise repulsion reads the other agents' positions
    pub repulsion_mode: RepulsionMode,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            safe_distance: 15.0,
            repulsion_strength: 0.5,
            surface_height: 0.0,
            heading_offset: constants::HALF_PI,
            radius_range: [20.0, 40.0],
            speed_range: [0.1, 0.3],
            seed: 7,
            landmark_name: "pond".to_string(),
            agent_prefix: "duck".to_string(),
            repulsion_mode: RepulsionMode::Snapshot,
        }
    }
}

/// # Camera Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
    /// Overview camera position
    pub default_position: Vec3,
    /// Overview look-at point
    pub default_look_at: Vec3,
    /// Fraction of the pending orbit motion applied per update
    pub orbit_damping: f32,
    /// Closest the orbit controller may dolly towards its target
    pub min_distance: f32,
    /// Farthest the orbit controller may dolly from its target
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            default_position: Vec3::new(0.0, 50.0, 100.0),
            default_look_at: Vec3::zeros(),
            orbit_damping: 0.05,
            min_distance: 5.0,
            max_distance: 500.0,
        }
    }
}

/// # Scene Configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// How interactive entities are recognised by node name
    pub interactive_naming: NamingConvention,
}
