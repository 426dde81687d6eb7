//! # Tour Engine
//!
//! Core of an interactive 3D campus-tour viewer.
//!
//! ## Features
//!
//! - **Picking**: pointer positions resolve to interactive buildings by
//!   ray casting and climbing to the owning entity
//! - **Focus transitions**: timed camera moves behind a fading overlay,
//!   safe under rapid re-selection
//! - **Ambient agents**: ducks circling a landmark with soft pairwise
//!   separation
//! - **Configuration**: TOML or RON files with defaults for every field
//!
//! Rendering, asset loading and the host UI are external; the engine talks
//! to them through [`spatial::SpatialQuery`], [`ui::UiSurface`] and the
//! [`tour::FrameSnapshot`] handed out every frame.
//!
//! ## Quick Start
//!
//! ```rust
//! use tour_engine::prelude::*;
//!
//! let mut scene = SceneGraph::new();
//! scene.add_root(
//!     "圖書館",
//!     Transform::identity(),
//!     Some(Geometry::Box(AABB::from_center_extents(Vec3::zeros(), Vec3::new(20.0, 20.0, 20.0)))),
//! );
//!
//! let mut tour = CampusTour::new(
//!     TourConfig::default(),
//!     scene,
//!     MetadataTable::new(),
//!     HeadlessUi::new(),
//!     (800, 600),
//!     0.0,
//! )?;
//!
//! tour.select_by_id("圖書館", 0.0)?;
//! let mut now = 0.0;
//! while tour.session().is_transitioning() {
//!     now += 1.0 / 60.0;
//!     tour.frame(now);
//! }
//! assert!(tour.ui().panel_visible());
//! # Ok::<(), TourError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core configuration
pub mod core;

pub mod foundation;
pub mod config;
pub mod spatial;
pub mod scene;
pub mod render;
pub mod input;
pub mod interaction;
pub mod metadata;
pub mod ui;
pub mod transition;
pub mod flock;
pub mod tour;

mod error;

pub use error::TourError;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        TourError,
        config::{Config, ConfigError},
        core::{TourConfig, TransitionConfig, FlockConfig, CameraConfig, SceneConfig},
        foundation::math::{Vec3, Mat4, Transform},
        spatial::{Ray, AABB, SpatialQuery},
        scene::{SceneGraph, Geometry, NamingConvention, NodeKey},
        render::{Camera, OrbitController},
        interaction::{EntityId, InteractionResolver, InteractiveEntity},
        metadata::{BuildingInfo, MetadataTable},
        ui::{CursorStyle, HeadlessUi, UiSurface},
        transition::{FocusTransitionController, TransitionPhase},
        flock::{Agent, FlockSimulator, OrbitDirection},
        tour::{CampusTour, FrameSnapshot, TourSession},
    };
}
