//! Abstract spatial query interface for pointer picking and framing
//!
//! This abstraction lets the interaction resolver and the focus controller
//! run against the real scene graph or against a hand-built fake in tests.

use crate::foundation::math::Vec3;
use crate::scene::NodeKey;
use crate::spatial::{Ray, AABB};

/// Result of a ray hit against leaf geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The primitive (geometry-carrying node) that was struck
    pub node: NodeKey,
    /// Ray parameter of the hit (distance from the ray origin)
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
}

/// Scene-side queries the viewer core depends on
pub trait SpatialQuery {
    /// Hit test `ray` against the full geometry of every candidate subtree
    ///
    /// Hits are reported against the struck descendant primitive, not the
    /// candidate root, ordered by increasing distance.
    fn raycast(&self, ray: &Ray, candidates: &[NodeKey]) -> Vec<RayHit>;

    /// World-space bounds of everything under `node`, `None` without geometry
    fn world_bounds(&self, node: NodeKey) -> Option<AABB>;

    /// World-space origin of `node`
    fn world_origin(&self, node: NodeKey) -> Option<Vec3>;

    /// Owning parent of `node`, `None` for roots and unknown nodes
    fn parent(&self, node: NodeKey) -> Option<NodeKey>;
}
