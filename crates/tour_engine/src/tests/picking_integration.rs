//! Hover and selection against nested building geometry

use crate::foundation::math::{Transform, Vec3};
use crate::interaction::{EntityId, EntityRegistry, InteractionResolver};
use crate::render::Camera;
use crate::scene::{Geometry, NamingConvention, SceneGraph};
use crate::spatial::{Triangle, AABB};

#[cfg(test)]
mod tests {
    use super::*;

    /// Camera on +Z looking at the origin
    fn camera() -> Camera {
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 50.0), 60.0, 1.0, 0.1, 1000.0);
        camera.set_target(Vec3::zeros());
        camera
    }

    /// Building whose only geometry sits three levels below the entity node
    fn nested_campus() -> (SceneGraph, InteractionResolver) {
        let mut scene = SceneGraph::new();
        let hall = scene.add_root("禮堂", Transform::identity(), None);
        // Offset so the center ray misses the facade's diagonal edge
        let wing = scene
            .add_child(hall, "wing", Transform::from_position(Vec3::new(1.0, 0.0, 2.0)), None)
            .unwrap();
        let floor = scene.add_child(wing, "floor_2", Transform::identity(), None).unwrap();
        scene.add_child(
            floor,
            "facade",
            Transform::identity(),
            Some(Geometry::Triangles(vec![
                Triangle::new(Vec3::new(-5.0, -5.0, 0.0), Vec3::new(5.0, -5.0, 0.0), Vec3::new(5.0, 5.0, 0.0)),
                Triangle::new(Vec3::new(-5.0, -5.0, 0.0), Vec3::new(5.0, 5.0, 0.0), Vec3::new(-5.0, 5.0, 0.0)),
            ])),
        );

        scene.add_root(
            "Tree.001",
            Transform::from_position(Vec3::new(20.0, 0.0, 0.0)),
            Some(Geometry::Box(AABB::from_center_extents(Vec3::zeros(), Vec3::new(2.0, 6.0, 2.0)))),
        );

        let registry = EntityRegistry::discover(&scene, &NamingConvention::CjkIdeographs);
        (scene, InteractionResolver::new(registry))
    }

    #[test]
    fn test_deep_hit_resolves_to_entity() {
        let (scene, resolver) = nested_campus();
        let picked = resolver.resolve((0.0, 0.0), &camera(), &scene).unwrap();
        assert_eq!(picked.id, EntityId::from("禮堂"));
    }

    #[test]
    fn test_hover_and_select_agree() {
        let (scene, resolver) = nested_campus();
        let camera = camera();
        for ndc in [(0.0, 0.0), (0.05, -0.05), (0.9, 0.9), (-3.0, 0.0), (0.35, 0.0)] {
            let hovered = resolver.hover(ndc, &camera, &scene).entity;
            let selected = resolver.select(ndc, &camera, &scene).map(|e| e.id.clone());
            assert_eq!(hovered, selected, "disagreement at {ndc:?}");
        }
    }

    #[test]
    fn test_unregistered_geometry_is_ignored() {
        let (scene, resolver) = nested_campus();
        let camera = camera();
        // Straight at the tree, which is not an interactive entity
        let direction = (Vec3::new(20.0, 0.0, 0.0) - camera.position).normalize();
        let view_x = direction.x / -direction.z;
        let ndc_x = view_x / (camera.fov / 2.0).tan();
        assert!(resolver.resolve((ndc_x, 0.0), &camera, &scene).is_none());
    }

    #[test]
    fn test_empty_registry_never_resolves() {
        let (scene, _) = nested_campus();
        let resolver = InteractionResolver::new(EntityRegistry::new());
        assert!(resolver.resolve((0.0, 0.0), &camera(), &scene).is_none());
    }
}
