//! Scene management system
//!
//! A minimal hierarchical scene graph standing in for the asset loader's
//! output. It answers the spatial queries the viewer core needs:
//!
//! ```text
//! Loader / demo builder
//!      ↓
//! SceneGraph (nodes, transforms, geometry)
//!      ↓
//! SpatialQuery (raycast, bounds, parent lookup)
//! ```

mod naming;
mod scene_graph;

pub use naming::NamingConvention;
pub use scene_graph::{Geometry, NodeKey, SceneGraph, SceneNode};
