//! Math utilities and types
//!
//! Provides the fundamental math types used by the camera, scene graph and
//! agent simulation.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,
    
    /// Rotation quaternion
    pub rotation: Quat,
    
    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }
    
    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
    
    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a transform with position and a rotation of `yaw` radians about +Y
    pub fn from_position_yaw(position: Vec3, yaw: f32) -> Self {
        Self::from_position_rotation(position, Quat::from_axis_angle(&Vec3::y_axis(), yaw))
    }

    /// Builder-style uniform or non-uniform scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
    
    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
    
    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * self.scale.component_mul(&point)
    }
    
    /// Combine this transform with another (`self` is the parent)
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;
    
    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
    
    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
    
    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};
    
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
    
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Linear interpolation between two vectors
    pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }

    /// Normalize `v`, or `None` when it is too short to have a direction
    pub fn try_normalize(v: Vec3) -> Option<Vec3> {
        v.try_normalize(1.0e-6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_combine_applies_parent_rotation_and_scale() {
        let parent = Transform::from_position_yaw(Vec3::new(10.0, 0.0, 0.0), constants::HALF_PI)
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        let child = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));

        let world = parent.combine(&child);

        // +X rotated a quarter turn about +Y lands on -Z, scaled by 2
        assert_relative_eq!(world.position, Vec3::new(10.0, 0.0, -2.0), epsilon = 1e-5);
        assert_relative_eq!(world.scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_transform_point_matches_matrix() {
        let transform = Transform::from_position_yaw(Vec3::new(1.0, 2.0, 3.0), 0.3)
            .with_scale(Vec3::new(1.0, 3.0, 2.0));
        let point = Vec3::new(0.5, -1.0, 4.0);

        let via_matrix = transform.to_matrix().transform_point(&Point3::from(point)).coords;
        assert_relative_eq!(transform.transform_point(point), via_matrix, epsilon = 1e-4);
    }

    #[test]
    fn test_try_normalize_rejects_zero() {
        assert!(utils::try_normalize(Vec3::zeros()).is_none());
        assert_relative_eq!(
            utils::try_normalize(Vec3::new(0.0, 3.0, 0.0)).unwrap(),
            Vec3::new(0.0, 1.0, 0.0)
        );
    }
}
