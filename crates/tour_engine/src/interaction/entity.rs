//! Interactive entities and their registry

use std::collections::HashMap;
use std::fmt;

use crate::foundation::math::Vec3;
use crate::scene::{NamingConvention, NodeKey, SceneGraph};

/// Stable, unique name of an interactive entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap a name as an id
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The underlying name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A user-selectable subtree of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveEntity {
    /// Stable id (the node name)
    pub id: EntityId,
    /// Root node of the entity's subtree
    pub node: NodeKey,
    /// Camera offset overriding the metadata table, if authored on the entity
    pub view_offset: Option<Vec3>,
}

impl InteractiveEntity {
    /// Create an entity without an authored view offset
    pub fn new(id: impl Into<EntityId>, node: NodeKey) -> Self {
        Self {
            id: id.into(),
            node,
            view_offset: None,
        }
    }

    /// Builder-style authored camera offset
    pub fn with_view_offset(mut self, offset: Vec3) -> Self {
        self.view_offset = Some(offset);
        self
    }
}

impl From<String> for EntityId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// All interactive entities of a session, in registration order
///
/// Entities are registered once during scene setup and never removed.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<InteractiveEntity>,
    by_id: HashMap<EntityId, usize>,
    by_node: HashMap<NodeKey, usize>,
    nodes: Vec<NodeKey>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every scene node following `convention`
    ///
    /// Nodes sharing a name with an earlier node are skipped so ids stay unique.
    pub fn discover(scene: &SceneGraph, convention: &NamingConvention) -> Self {
        let mut registry = Self::new();
        for key in scene.discover(convention) {
            if let Some(node) = scene.node(key) {
                registry.register(InteractiveEntity::new(node.name.as_str(), key));
            }
        }
        log::info!("Discovered {} interactive entities", registry.len());
        registry
    }

    /// Register an entity; returns false if its id or node is already taken
    pub fn register(&mut self, entity: InteractiveEntity) -> bool {
        if self.by_id.contains_key(&entity.id) || self.by_node.contains_key(&entity.node) {
            log::warn!("Skipping duplicate interactive entity '{}'", entity.id);
            return false;
        }
        let index = self.entities.len();
        self.by_id.insert(entity.id.clone(), index);
        self.by_node.insert(entity.node, index);
        self.nodes.push(entity.node);
        self.entities.push(entity);
        true
    }

    /// Entity registered under `id`
    pub fn get(&self, id: &EntityId) -> Option<&InteractiveEntity> {
        self.by_id.get(id).map(|&i| &self.entities[i])
    }

    /// Entity rooted at `node`
    pub fn by_node(&self, node: NodeKey) -> Option<&InteractiveEntity> {
        self.by_node.get(&node).map(|&i| &self.entities[i])
    }

    /// Root nodes of all entities, the candidate set for picking
    pub fn nodes(&self) -> &[NodeKey] {
        &self.nodes
    }

    /// Entities in registration order
    pub fn iter(&self) -> impl Iterator<Item = &InteractiveEntity> {
        self.entities.iter()
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;

    #[test]
    fn test_discover_skips_duplicate_names() {
        let mut scene = SceneGraph::new();
        let first = scene.add_root("圖書館", Transform::identity(), None);
        scene.add_root("圖書館", Transform::identity(), None);
        let hall = scene.add_root("行政大樓", Transform::identity(), None);

        let registry = EntityRegistry::discover(&scene, &NamingConvention::CjkIdeographs);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.nodes(), &[first, hall]);
        assert_eq!(registry.get(&EntityId::from("圖書館")).unwrap().node, first);
        assert_eq!(registry.by_node(hall).unwrap().id.as_str(), "行政大樓");
    }

    #[test]
    fn test_register_rejects_reused_node() {
        let mut scene = SceneGraph::new();
        let node = scene.add_root("a", Transform::identity(), None);
        let mut registry = EntityRegistry::new();

        assert!(registry.register(InteractiveEntity::new("a", node)));
        assert!(!registry.register(InteractiveEntity::new("b", node)));
        assert_eq!(registry.len(), 1);
    }
}
