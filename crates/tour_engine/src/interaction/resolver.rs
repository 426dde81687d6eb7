//! Interaction resolver: pointer position to interactive entity
//!
//! Hover and selection share [`InteractionResolver::resolve`], so the two
//! always agree on which building is under the pointer.

use std::collections::HashSet;

use crate::interaction::{EntityId, EntityRegistry, InteractiveEntity};
use crate::render::Camera;
use crate::scene::NodeKey;
use crate::spatial::SpatialQuery;
use crate::ui::CursorStyle;

/// Outcome of a hover query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverResult {
    /// Entity under the pointer, if any
    pub entity: Option<EntityId>,
    /// Cursor affordance to show
    pub cursor: CursorStyle,
}

/// Resolves pointer positions against the registered entities
#[derive(Debug, Default)]
pub struct InteractionResolver {
    registry: EntityRegistry,
}

impl InteractionResolver {
    /// Create a resolver over a populated registry
    pub fn new(registry: EntityRegistry) -> Self {
        Self { registry }
    }

    /// Registered entities
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Resolve a pointer position to the nearest candidate subtree under it
    ///
    /// Casts a ray from `camera` through `pointer_ndc` against every
    /// candidate's full geometry, takes the nearest hit and climbs from the
    /// struck primitive to its closest ancestor that is a candidate.
    /// Returns `None` when nothing is hit or the climb never reaches a
    /// candidate.
    pub fn resolve_among(
        pointer_ndc: (f32, f32),
        camera: &Camera,
        query: &dyn SpatialQuery,
        candidates: &[NodeKey],
    ) -> Option<NodeKey> {
        if candidates.is_empty() {
            return None;
        }

        let ray = camera.screen_to_world_ray(pointer_ndc.0, pointer_ndc.1);
        let nearest = query
            .raycast(&ray, candidates)
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))?;

        let candidates: HashSet<NodeKey> = candidates.iter().copied().collect();
        let mut current = Some(nearest.node);
        while let Some(node) = current {
            if candidates.contains(&node) {
                return Some(node);
            }
            current = query.parent(node);
        }

        log::debug!("Hit primitive {:?} has no registered ancestor", nearest.node);
        None
    }

    /// Resolve a pointer position to a registered entity
    pub fn resolve(
        &self,
        pointer_ndc: (f32, f32),
        camera: &Camera,
        query: &dyn SpatialQuery,
    ) -> Option<&InteractiveEntity> {
        Self::resolve_among(pointer_ndc, camera, query, self.registry.nodes())
            .and_then(|node| self.registry.by_node(node))
    }

    /// Continuous hover query; only decides the cursor affordance
    pub fn hover(&self, pointer_ndc: (f32, f32), camera: &Camera, query: &dyn SpatialQuery) -> HoverResult {
        let entity = self.resolve(pointer_ndc, camera, query).map(|e| e.id.clone());
        let cursor = if entity.is_some() { CursorStyle::Pointer } else { CursorStyle::Default };
        HoverResult { entity, cursor }
    }

    /// Discrete selection query
    pub fn select(&self, pointer_ndc: (f32, f32), camera: &Camera, query: &dyn SpatialQuery) -> Option<&InteractiveEntity> {
        let picked = self.resolve(pointer_ndc, camera, query);
        match picked {
            Some(entity) => log::debug!("Selection hit '{}'", entity.id),
            None => log::debug!("Selection missed at {:?}", pointer_ndc),
        }
        picked
    }
}
