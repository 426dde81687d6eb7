//! Free user orbit control
//!
//! Damped orbit-around-target camera control. User input accumulates
//! pending spherical motion; each `update` applies a fraction of it, so the
//! camera eases to rest after the input stops.

use crate::core::CameraConfig;
use crate::foundation::math::{constants, Vec3};
use crate::render::Camera;

const POLAR_EPSILON: f32 = 1.0e-4;
const SETTLE_EPSILON: f32 = 1.0e-6;

/// Orbit controller driving a [`Camera`] around a look target
#[derive(Debug, Clone)]
pub struct OrbitController {
    enabled: bool,
    target: Vec3,
    damping_factor: f32,
    min_distance: f32,
    max_distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,
}

impl OrbitController {
    /// Create an enabled controller orbiting `target`
    pub fn new(target: Vec3, config: &CameraConfig) -> Self {
        Self {
            enabled: true,
            target,
            damping_factor: config.orbit_damping.clamp(0.0, 1.0),
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
        }
    }

    /// Whether user input currently moves the camera
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable free control; disabling drops any pending motion
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!("Orbit control {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
        if !enabled {
            self.stop();
        }
    }

    /// Point the camera orbits around
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the orbit pivot
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Queue a rotation around the vertical axis (radians)
    pub fn rotate_left(&mut self, angle: f32) {
        if self.enabled {
            self.pending_azimuth += angle;
        }
    }

    /// Queue a rotation towards the top pole (radians)
    pub fn rotate_up(&mut self, angle: f32) {
        if self.enabled {
            self.pending_polar -= angle;
        }
    }

    /// Queue a zoom; factors above 1 move the camera closer
    pub fn dolly_in(&mut self, factor: f32) {
        if self.enabled && factor > 0.0 {
            self.pending_scale /= factor;
        }
    }

    /// Drop any queued motion
    pub fn stop(&mut self) {
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_scale = 1.0;
    }

    /// Whether no queued motion is left to apply
    pub fn is_settled(&self) -> bool {
        self.pending_azimuth.abs() < SETTLE_EPSILON
            && self.pending_polar.abs() < SETTLE_EPSILON
            && (self.pending_scale - 1.0).abs() < SETTLE_EPSILON
    }

    /// Apply one damped step of queued motion to `camera`
    ///
    /// Does nothing while disabled. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.enabled {
            return false;
        }
        if self.is_settled() && camera.target == self.target {
            return false;
        }

        let offset = camera.position - self.target;
        let radius = offset.magnitude();
        let (mut azimuth, mut polar) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, constants::HALF_PI)
        };

        azimuth += self.pending_azimuth * self.damping_factor;
        polar += self.pending_polar * self.damping_factor;
        polar = polar.clamp(POLAR_EPSILON, constants::PI - POLAR_EPSILON);
        let radius = (radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        let sin_polar = polar.sin();
        let new_position = self.target
            + Vec3::new(
                radius * sin_polar * azimuth.sin(),
                radius * polar.cos(),
                radius * sin_polar * azimuth.cos(),
            );

        self.pending_azimuth *= 1.0 - self.damping_factor;
        self.pending_polar *= 1.0 - self.damping_factor;
        self.pending_scale = 1.0;

        let moved = (new_position - camera.position).magnitude_squared() > 1.0e-12
            || camera.target != self.target;
        camera.set_position(new_position);
        camera.set_target(self.target);
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn setup() -> (OrbitController, Camera) {
        let config = CameraConfig::default();
        let camera = Camera::from_config(&config, 1.0);
        (OrbitController::new(config.default_look_at, &config), camera)
    }

    #[test]
    fn test_damped_rotation_converges_to_requested_angle() {
        let (mut orbit, mut camera) = setup();
        let start = camera.position;
        orbit.rotate_left(0.5);

        for _ in 0..600 {
            orbit.update(&mut camera);
        }

        let before = start.x.atan2(start.z);
        let after = camera.position.x.atan2(camera.position.z);
        assert_relative_eq!(after - before, 0.5, epsilon = 1e-3);
        // Distance to the target is preserved by pure rotation
        assert_relative_eq!(camera.position.magnitude(), start.magnitude(), epsilon = 1e-2);
    }

    #[test]
    fn test_disabled_controller_leaves_camera_alone() {
        let (mut orbit, mut camera) = setup();
        orbit.set_enabled(false);
        orbit.rotate_left(1.0);
        let before = camera.clone();

        assert!(!orbit.update(&mut camera));
        assert_eq!(camera, before);
    }

    #[test]
    fn test_disabling_drops_pending_motion() {
        let (mut orbit, mut camera) = setup();
        orbit.rotate_left(1.0);
        orbit.set_enabled(false);
        orbit.set_enabled(true);
        let before = camera.position;

        orbit.update(&mut camera);
        assert_relative_eq!(camera.position, before, epsilon = 1e-3);
    }

    #[test]
    fn test_dolly_respects_distance_limits() {
        let (mut orbit, mut camera) = setup();
        orbit.dolly_in(1000.0);
        orbit.update(&mut camera);
        assert_relative_eq!((camera.position - orbit.target()).magnitude(), 5.0, epsilon = 1e-3);
    }

    #[test]
    fn test_update_aims_camera_at_target() {
        let (mut orbit, mut camera) = setup();
        orbit.set_target(Vec3::new(3.0, 0.0, -4.0));
        orbit.update(&mut camera);
        assert_relative_eq!(camera.target, Vec3::new(3.0, 0.0, -4.0));
    }

    #[test]
    fn test_settled_controller_leaves_camera_alone() {
        let (mut orbit, mut camera) = setup();
        camera.set_target(orbit.target());
        let before = camera.clone();

        assert!(orbit.is_settled());
        assert!(!orbit.update(&mut camera));
        assert_eq!(camera, before);
    }
}
