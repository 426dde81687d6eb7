//! Hierarchical scene graph
//!
//! Nodes live in a slot map and reference each other by key; parents own
//! nothing, so an "ancestor-of" walk is a chain of key lookups.

use std::collections::HashSet;

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Transform, Vec3};
use crate::scene::NamingConvention;
use crate::spatial::{Ray, RayHit, SpatialQuery, Triangle, AABB};

new_key_type! {
    /// Stable handle to a node in the [`SceneGraph`]
    pub struct NodeKey;
}

/// Hit-testable geometry attached to a node, in the node's local space
#[derive(Debug, Clone)]
pub enum Geometry {
    /// Triangle soup (mesh primitives)
    Triangles(Vec<Triangle>),
    /// Solid axis-aligned box
    Box(AABB),
}

impl Geometry {
    /// Local-space bounds, `None` for an empty triangle list
    fn local_bounds(&self) -> Option<AABB> {
        match self {
            Self::Triangles(triangles) => {
                AABB::from_points(triangles.iter().flat_map(|t| [t.v0, t.v1, t.v2]))
            }
            Self::Box(aabb) => Some(*aabb),
        }
    }

    /// Nearest hit of a world-space ray against this geometry placed by `world`
    fn intersect_ray(&self, ray: &Ray, world: &Transform) -> Option<f32> {
        match self {
            Self::Triangles(triangles) => triangles
                .iter()
                .filter_map(|t| t.transformed(world).intersect_ray(ray))
                .min_by(f32::total_cmp),
            Self::Box(aabb) => aabb.transformed(world).intersect_ray(ray),
        }
    }
}

/// One node of the scene hierarchy
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Author-given name, used for discovery
    pub name: String,
    /// Transform relative to the parent
    pub local: Transform,
    /// Optional hit-testable geometry
    pub geometry: Option<Geometry>,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl SceneNode {
    /// Parent of this node, if any
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

/// Scene graph owning every node of the loaded campus
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    roots: Vec<NodeKey>,
}

impl SceneGraph {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level node
    pub fn add_root(&mut self, name: impl Into<String>, local: Transform, geometry: Option<Geometry>) -> NodeKey {
        let key = self.nodes.insert(SceneNode {
            name: name.into(),
            local,
            geometry,
            parent: None,
            children: Vec::new(),
        });
        self.roots.push(key);
        key
    }

    /// Add a node under `parent`; returns `None` if the parent does not exist
    pub fn add_child(
        &mut self,
        parent: NodeKey,
        name: impl Into<String>,
        local: Transform,
        geometry: Option<Geometry>,
    ) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let key = self.nodes.insert(SceneNode {
            name: name.into(),
            local,
            geometry,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(key);
        Some(key)
    }

    /// Look up a node
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Replace a node's local transform
    pub fn set_local_transform(&mut self, key: NodeKey, local: Transform) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.local = local;
        }
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Accumulated transform from the root down to `key`
    pub fn world_transform(&self, key: NodeKey) -> Option<Transform> {
        let node = self.nodes.get(key)?;
        let world = match node.parent {
            Some(parent) => self.world_transform(parent)?.combine(&node.local),
            None => node.local.clone(),
        };
        Some(world)
    }

    /// First node (depth-first, insertion order) with exactly this name
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.traverse().into_iter().find(|key| self.nodes[*key].name == name)
    }

    /// Every node whose name follows `convention`, depth-first in insertion order
    pub fn discover(&self, convention: &NamingConvention) -> Vec<NodeKey> {
        self.traverse()
            .into_iter()
            .filter(|key| convention.matches(&self.nodes[*key].name))
            .collect()
    }

    /// `key` followed by all of its descendants, depth-first
    pub fn descendants(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        if self.nodes.contains_key(key) {
            self.collect_preorder(key, &mut out);
        }
        out
    }

    fn traverse(&self) -> Vec<NodeKey> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for root in &self.roots {
            self.collect_preorder(*root, &mut out);
        }
        out
    }

    fn collect_preorder(&self, key: NodeKey, out: &mut Vec<NodeKey>) {
        out.push(key);
        for child in &self.nodes[key].children {
            self.collect_preorder(*child, out);
        }
    }

    /// Visit `key` and its descendants with their world transforms
    fn visit_subtree(&self, key: NodeKey, world: Transform, visit: &mut dyn FnMut(NodeKey, &SceneNode, &Transform)) {
        let node = &self.nodes[key];
        visit(key, node, &world);
        for child in &node.children {
            let child_world = world.combine(&self.nodes[*child].local);
            self.visit_subtree(*child, child_world, visit);
        }
    }
}

impl SpatialQuery for SceneGraph {
    fn raycast(&self, ray: &Ray, candidates: &[NodeKey]) -> Vec<RayHit> {
        let mut visited = HashSet::new();
        let mut hits = Vec::new();

        for candidate in candidates {
            let Some(world) = self.world_transform(*candidate) else {
                continue;
            };
            self.visit_subtree(*candidate, world, &mut |key, node, world| {
                // Overlapping candidate subtrees must not report a primitive twice
                if !visited.insert(key) {
                    return;
                }
                if let Some(distance) = node.geometry.as_ref().and_then(|g| g.intersect_ray(ray, world)) {
                    hits.push(RayHit {
                        node: key,
                        distance,
                        point: ray.point_at(distance),
                    });
                }
            });
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn world_bounds(&self, node: NodeKey) -> Option<AABB> {
        let world = self.world_transform(node)?;
        let mut bounds: Option<AABB> = None;
        self.visit_subtree(node, world, &mut |_, node, world| {
            if let Some(local) = node.geometry.as_ref().and_then(Geometry::local_bounds) {
                let placed = local.transformed(world);
                bounds = Some(bounds.map_or(placed, |b| b.union(&placed)));
            }
        });
        bounds
    }

    fn world_origin(&self, node: NodeKey) -> Option<Vec3> {
        self.world_transform(node).map(|t| t.position)
    }

    fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes.get(node).and_then(|n| n.parent)
    }
}
