//! Primitive shapes and intersection algorithms
//!
//! Provides rays, triangles and axis-aligned boxes with the intersection
//! tests needed for pointer picking and framing.

use crate::foundation::math::{Transform, Vec3};

const DEGENERATE_EPSILON: f32 = 1.0e-6;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A triangle for hit testing
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Return this triangle with every vertex moved through `transform`
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self {
            v0: transform.transform_point(self.v0),
            v1: transform.transform_point(self.v1),
            v2: transform.transform_point(self.v2),
        }
    }

    /// Möller-Trumbore ray-triangle intersection algorithm
    /// Returns the ray parameter `t` of the hit, None otherwise
    ///
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        const EPSILON: f32 = 0.000_001;
        
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        
        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);
        
        // Ray parallel to triangle?
        if a.abs() < EPSILON {
            return None;
        }
        
        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);
        
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        
        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);
        
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        
        let t = f * edge2.dot(&q);
        
        // Behind the ray origin?
        (t >= 0.0).then_some(t)
    }
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }
    
    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Self::new(first, first);
        for point in points {
            aabb.expand_to(point);
        }
        Some(aabb)
    }

    /// Grow this box to contain `point`
    pub fn expand_to(&mut self, point: Vec3) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }
    
    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
    
    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size of the box along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// A box without volume (or holding non-finite values) cannot frame anything
    pub fn is_degenerate(&self) -> bool {
        let size = self.size();
        !size.iter().all(|c| c.is_finite()) || size.min() <= DEGENERATE_EPSILON
    }

    /// Finite and extending along at least one axis; flat boxes still have a center
    pub fn has_extent(&self) -> bool {
        let size = self.size();
        size.iter().all(|c| c.is_finite()) && size.max() > DEGENERATE_EPSILON
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// World-space box enclosing this box after `transform`
    pub fn transformed(&self, transform: &Transform) -> AABB {
        let corners = self.corners().map(|corner| transform.transform_point(corner));
        let mut aabb = AABB::new(corners[0], corners[0]);
        for corner in &corners[1..] {
            aabb.expand_to(*corner);
        }
        aabb
    }
    
    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }
    
    /// Test ray intersection with this AABB using slab method
    /// Returns the distance to the entry point if the ray intersects, None otherwise
    /// Based on "An Efficient and Robust Ray–Box Intersection Algorithm"
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = ray.direction.map(|d| if d == 0.0 { f32::INFINITY } else { 1.0 / d });
        
        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;
        
        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));
        
        if tmax >= tmin && tmax >= 0.0 {
            // Entry point distance, or 0 when the origin is inside the box
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}
