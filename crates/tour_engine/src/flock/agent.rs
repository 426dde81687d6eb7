//! Agent state

use crate::foundation::math::{Transform, Vec3};
use crate::scene::NodeKey;

/// Orbit direction seen from above (looking down -Y)
///
/// Clockwise orbits advance the orbit angle from +X towards +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitDirection {
    /// Angle increases over time
    Clockwise,
    /// Angle decreases over time
    CounterClockwise,
}

impl OrbitDirection {
    /// Multiplier applied to the angular speed
    pub fn sign(self) -> f32 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }
}

/// One orbiting agent
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Stable name, the scene node name for discovered agents
    pub id: String,
    /// Scene node receiving the agent's transform
    pub node: Option<NodeKey>,
    /// Orbit radius around the orbit center
    pub orbit_radius: f32,
    /// Angular speed in radians per second
    pub angular_speed: f32,
    /// Orbit direction
    pub direction: OrbitDirection,
    /// Orbit angle at elapsed time zero
    pub phase_offset: f32,
    /// Position after the last tick
    pub position: Vec3,
    /// Yaw about +Y after the last tick
    pub heading: f32,
}

impl Agent {
    /// Create an agent that is not bound to a scene node
    pub fn new(
        id: impl Into<String>,
        orbit_radius: f32,
        angular_speed: f32,
        direction: OrbitDirection,
        phase_offset: f32,
    ) -> Self {
        Self {
            id: id.into(),
            node: None,
            orbit_radius,
            angular_speed,
            direction,
            phase_offset,
            position: Vec3::zeros(),
            heading: 0.0,
        }
    }

    /// Bind the agent to a scene node
    pub fn with_node(mut self, node: NodeKey) -> Self {
        self.node = Some(node);
        self
    }

    /// Signed angular velocity, negative for decreasing orbit angles
    pub fn signed_speed(&self) -> f32 {
        self.angular_speed * self.direction.sign()
    }

    /// Orbit angle at `elapsed` seconds
    pub fn angle_at(&self, elapsed: f64) -> f32 {
        (elapsed * f64::from(self.signed_speed()) + f64::from(self.phase_offset)) as f32
    }

    /// Pose as a transform for the owning scene node
    pub fn transform(&self) -> Transform {
        Transform::from_position_yaw(self.position, self.heading)
    }
}
