//! # 3D Camera System
//!
//! Perspective camera with look-at orientation.
//!
//! ## Design Principles
//! - **Library-agnostic**: No graphics-API dependencies in camera math
//! - **Mathematical correctness**: Right-handed, Y-up view space
//! - **Degenerate-safe**: A camera sitting on its own target still has a valid basis

use crate::core::CameraConfig;
use crate::foundation::math::{utils, Mat4, Point3, Vec3};
use crate::spatial::Ray;

/// 3D perspective camera
///
/// # Coordinate System
/// Standard right-handed Y-up coordinate system:
/// - X+ = Right
/// - Y+ = Up
/// - looking down -Z in view space
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    
    /// Point the camera is looking at in world space
    pub target: Vec3,
    
    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,
    
    /// Vertical field of view angle in radians
    pub fov: f32,
    
    /// Aspect ratio (width / height) for projection calculations
    pub aspect: f32,
    
    /// Distance to near clipping plane
    pub near: f32,
    
    /// Distance to far clipping plane  
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera with standard Y-up orientation
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Camera at the configured overview pose
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::perspective(
            config.default_position,
            config.fov_degrees,
            aspect,
            config.near,
            config.far,
        );
        camera.set_target(config.default_look_at);
        camera
    }
    
    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }
    
    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }
    
    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs aspect ratio changes when the difference is significant
    /// (> 0.01) to reduce log noise during window resize events.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Normalized view direction
    ///
    /// Falls back to -Z when the camera sits on its target.
    pub fn forward(&self) -> Vec3 {
        utils::try_normalize(self.target - self.position).unwrap_or_else(|| Vec3::new(0.0, 0.0, -1.0))
    }

    /// Orthonormal (right, up, forward) basis of the view
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.forward();
        let right = utils::try_normalize(forward.cross(&self.up))
            // Looking straight along the up vector: pick any perpendicular axis
            .unwrap_or_else(|| Vec3::new(1.0, 0.0, 0.0));
        let up = right.cross(&forward);
        (right, up, forward)
    }
    
    /// Generate view matrix for world-to-camera space transformation
    pub fn get_view_matrix(&self) -> Mat4 {
        let (_, up, forward) = self.basis();
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.position + forward),
            &up,
        )
    }
    
    /// Generate perspective projection matrix
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }
    
    /// Generate combined view-projection matrix
    pub fn get_view_projection_matrix(&self) -> Mat4 {
        self.get_projection_matrix() * self.get_view_matrix()
    }

    /// Convert normalized device coordinates to a world-space ray
    ///
    /// Takes NDC with X growing right and Y growing up, both in [-1, 1]
    /// for on-screen points. Values outside that range are still valid and
    /// produce rays outside the view frustum.
    ///
    /// # Returns
    /// Ray in world space originating at camera position
    pub fn screen_to_world_ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let (right, up, forward) = self.basis();
        let half_height = (self.fov * 0.5).tan();
        let half_width = half_height * self.aspect;

        let direction = forward + right * (ndc_x * half_width) + up * (ndc_y * half_height);
        Ray::new(self.position, direction)
    }
}

impl Default for Camera {
    /// Overview camera of the default configuration with a 16:9 aspect
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}
