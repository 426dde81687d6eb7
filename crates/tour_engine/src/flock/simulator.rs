//! Orbit motion with pairwise soft repulsion

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::FlockConfig;
use crate::flock::{Agent, OrbitDirection};
use crate::foundation::math::{constants, utils, Vec3};
use crate::scene::{NamingConvention, SceneGraph};
use crate::spatial::{SpatialQuery, AABB};

/// Which positions repulsion reads for the other agents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepulsionMode {
    /// Everyone is pushed away from the base positions of this tick
    ///
    /// The result does not depend on agent order.
    #[default]
    Snapshot,
    /// Earlier agents' final positions from this tick, later agents'
    /// positions from the previous tick
    Sequential,
}

/// Owns every agent and advances them along their orbits
#[derive(Debug, Clone)]
pub struct FlockSimulator {
    agents: Vec<Agent>,
    center: Vec3,
    config: FlockConfig,
}

impl FlockSimulator {
    /// Create a simulator placing every agent at its base position for time zero
    pub fn new(center: Vec3, agents: Vec<Agent>, config: FlockConfig) -> Self {
        let mut simulator = Self {
            agents,
            center,
            config,
        };
        for index in 0..simulator.agents.len() {
            let base = simulator.base_position(&simulator.agents[index], 0.0);
            let heading = simulator.heading_at(&simulator.agents[index], base);
            let agent = &mut simulator.agents[index];
            agent.position = base;
            agent.heading = heading;
        }
        simulator
    }

    /// Build agents from scene nodes named with the configured prefix
    ///
    /// Orbit parameters are drawn from the configured ranges with a seeded
    /// generator, so the same scene and seed give the same flock.
    pub fn discover(scene: &SceneGraph, config: &FlockConfig) -> Self {
        let center = Self::resolve_orbit_center(scene, &config.landmark_name);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let (radius_lo, radius_hi) = ordered(config.radius_range);
        let (speed_lo, speed_hi) = ordered(config.speed_range);

        let convention = NamingConvention::Prefix(config.agent_prefix.clone());
        let agents: Vec<Agent> = scene
            .discover(&convention)
            .into_iter()
            .filter_map(|key| {
                let node = scene.node(key)?;
                let direction = if rng.gen_bool(0.5) {
                    OrbitDirection::Clockwise
                } else {
                    OrbitDirection::CounterClockwise
                };
                let agent = Agent::new(
                    node.name.clone(),
                    rng.gen_range(radius_lo..=radius_hi),
                    rng.gen_range(speed_lo..=speed_hi),
                    direction,
                    rng.gen_range(0.0..constants::TAU),
                );
                Some(agent.with_node(key))
            })
            .collect();

        log::info!("Discovered {} agents around {:?}", agents.len(), center);
        Self::new(center, agents, config.clone())
    }

    /// Center of the landmark named `landmark`, or the world origin
    pub fn resolve_orbit_center(scene: &SceneGraph, landmark: &str) -> Vec3 {
        let Some(key) = scene.find_by_name(landmark) else {
            log::warn!("Orbit landmark '{}' not found, agents orbit the origin", landmark);
            return Vec3::zeros();
        };
        scene
            .world_bounds(key)
            .filter(AABB::has_extent)
            .map(|bounds| bounds.center())
            .or_else(|| scene.world_origin(key))
            .unwrap_or_else(Vec3::zeros)
    }

    /// Agents in creation order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Shared orbit center
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Tuning in use
    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Point on the agent's orbit at `elapsed` seconds, before repulsion
    pub fn base_position(&self, agent: &Agent, elapsed: f64) -> Vec3 {
        let theta = agent.angle_at(elapsed);
        Vec3::new(
            self.center.x + agent.orbit_radius * theta.cos(),
            self.config.surface_height,
            self.center.z + agent.orbit_radius * theta.sin(),
        )
    }

    /// Move every agent to its position at `elapsed` seconds since start
    pub fn advance(&mut self, elapsed: f64) {
        let bases: Vec<Vec3> = self
            .agents
            .iter()
            .map(|agent| self.base_position(agent, elapsed))
            .collect();

        for index in 0..self.agents.len() {
            let push = match self.config.repulsion_mode {
                RepulsionMode::Snapshot => self.repulsion(index, bases[index], |other| bases[other]),
                RepulsionMode::Sequential => {
                    let agents = &self.agents;
                    self.repulsion(index, bases[index], |other| agents[other].position)
                }
            };
            let mut position = bases[index] + push;
            position.y = self.config.surface_height;
            let heading = self.heading_at(&self.agents[index], position);

            let agent = &mut self.agents[index];
            agent.position = position;
            agent.heading = heading;
        }
        log::trace!("Advanced {} agents to t={:.3}", self.agents.len(), elapsed);
    }

    fn repulsion(&self, index: usize, base: Vec3, other_position: impl Fn(usize) -> Vec3) -> Vec3 {
        let safe = self.config.safe_distance;
        let mut push = Vec3::zeros();
        for other in (0..self.agents.len()).filter(|&other| other != index) {
            let away = base - other_position(other);
            let distance = away.norm();
            if distance >= safe {
                continue;
            }
            // Coincident agents split along X by index
            let direction = utils::try_normalize(away).unwrap_or_else(|| {
                if index < other {
                    -Vec3::x()
                } else {
                    Vec3::x()
                }
            });
            push += direction * (safe - distance) * self.config.repulsion_strength;
        }
        push
    }

    fn heading_at(&self, agent: &Agent, position: Vec3) -> f32 {
        let theta = (position.z - self.center.z).atan2(position.x - self.center.x);
        let sign = if agent.signed_speed() < 0.0 { -1.0 } else { 1.0 };
        -theta - sign * self.config.heading_offset
    }
}

fn ordered(range: [f32; 2]) -> (f32, f32) {
    (range[0].min(range[1]), range[0].max(range[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::scene::Geometry;
    use approx::assert_relative_eq;

    fn flock(agents: Vec<Agent>) -> FlockSimulator {
        FlockSimulator::new(Vec3::zeros(), agents, FlockConfig::default())
    }

    #[test]
    fn test_base_position_scenarios() {
        let simulator = flock(vec![Agent::new("duck", 10.0, 1.0, OrbitDirection::Clockwise, 0.0)]);
        let agent = &simulator.agents()[0];

        assert_relative_eq!(simulator.base_position(agent, 0.0), Vec3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(
            simulator.base_position(agent, std::f64::consts::FRAC_PI_2),
            Vec3::new(0.0, 0.0, 10.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_base_position_uses_center_and_surface() {
        let config = FlockConfig {
            surface_height: 2.5,
            ..FlockConfig::default()
        };
        let center = Vec3::new(5.0, -1.0, 5.0);
        let simulator = FlockSimulator::new(
            center,
            vec![Agent::new("duck", 4.0, 1.0, OrbitDirection::CounterClockwise, 0.0)],
            config,
        );
        let agent = &simulator.agents()[0];
        assert_relative_eq!(
            simulator.base_position(agent, std::f64::consts::FRAC_PI_2),
            Vec3::new(5.0, 2.5, 1.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_uncontested_agent_stays_on_orbit() {
        let mut simulator = flock(vec![
            Agent::new("duck_a", 20.0, 0.3, OrbitDirection::Clockwise, 0.0),
            Agent::new("duck_b", 20.0, 0.3, OrbitDirection::Clockwise, constants::PI),
        ]);
        simulator.advance(3.0);
        for agent in simulator.agents() {
            assert_eq!(agent.position, simulator.base_position(agent, 3.0));
        }
    }

    #[test]
    fn test_close_pair_is_pushed_apart() {
        for mode in [RepulsionMode::Snapshot, RepulsionMode::Sequential] {
            let config = FlockConfig {
                repulsion_mode: mode,
                ..FlockConfig::default()
            };
            let mut simulator = FlockSimulator::new(
                Vec3::zeros(),
                vec![
                    Agent::new("duck_a", 10.0, 0.0, OrbitDirection::Clockwise, 0.0),
                    Agent::new("duck_b", 15.0, 0.0, OrbitDirection::Clockwise, 0.0),
                ],
                config,
            );
            simulator.advance(0.0);
            let [a, b] = [&simulator.agents()[0], &simulator.agents()[1]];
            let separation = (a.position - b.position).norm();
            assert!(separation > 5.0, "{mode:?} left separation {separation}");
            assert!(a.position.x < 10.0 && b.position.x > 15.0);
        }
    }

    #[test]
    fn test_sequential_reads_positions_updated_this_tick() {
        let config = FlockConfig {
            repulsion_mode: RepulsionMode::Sequential,
            ..FlockConfig::default()
        };
        let mut simulator = FlockSimulator::new(
            Vec3::zeros(),
            vec![
                Agent::new("duck_a", 10.0, 0.0, OrbitDirection::Clockwise, 0.0),
                Agent::new("duck_b", 15.0, 0.0, OrbitDirection::Clockwise, 0.0),
            ],
            config,
        );

        // a sees b where it was; b sees a where it just went
        simulator.advance(0.0);
        assert_relative_eq!(simulator.agents()[0].position, Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(simulator.agents()[1].position, Vec3::new(17.5, 0.0, 0.0), epsilon = 1e-5);

        simulator.advance(0.0);
        assert_relative_eq!(simulator.agents()[0].position, Vec3::new(6.25, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(simulator.agents()[1].position, Vec3::new(18.125, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_snapshot_push_is_symmetric() {
        let mut simulator = flock(vec![
            Agent::new("duck_a", 10.0, 0.0, OrbitDirection::Clockwise, 0.0),
            Agent::new("duck_b", 15.0, 0.0, OrbitDirection::Clockwise, 0.0),
        ]);
        simulator.advance(0.0);
        // overlap 10 * 0.5 each way
        assert_relative_eq!(simulator.agents()[0].position, Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(simulator.agents()[1].position, Vec3::new(20.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_snapshot_is_order_independent() {
        let agents = vec![
            Agent::new("duck_a", 10.0, 0.2, OrbitDirection::Clockwise, 0.0),
            Agent::new("duck_b", 14.0, 0.1, OrbitDirection::CounterClockwise, 0.3),
            Agent::new("duck_c", 12.0, 0.3, OrbitDirection::Clockwise, 0.1),
        ];
        let mut forward = flock(agents.clone());
        let mut reversed = flock(agents.into_iter().rev().collect());
        forward.advance(1.7);
        reversed.advance(1.7);

        for agent in forward.agents() {
            let twin = reversed.agents().iter().find(|other| other.id == agent.id).unwrap();
            assert_relative_eq!(agent.position, twin.position, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_coincident_agents_separate() {
        let mut simulator = flock(vec![
            Agent::new("duck_a", 10.0, 0.0, OrbitDirection::Clockwise, 0.0),
            Agent::new("duck_b", 10.0, 0.0, OrbitDirection::Clockwise, 0.0),
        ]);
        simulator.advance(0.0);
        let [a, b] = [&simulator.agents()[0], &simulator.agents()[1]];
        assert!((a.position - b.position).norm() > 0.0);
        assert!(a.position.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_heading_faces_travel_direction() {
        let mut simulator = flock(vec![
            Agent::new("duck_cw", 10.0, 1.0, OrbitDirection::Clockwise, 0.0),
            Agent::new("duck_ccw", 30.0, 1.0, OrbitDirection::CounterClockwise, 0.0),
        ]);
        for elapsed in [0.0, 0.7, 2.0, 4.5] {
            simulator.advance(elapsed);
            for agent in simulator.agents() {
                let theta = agent.angle_at(elapsed);
                let sign = agent.direction.sign();
                let travel = Vec3::new(-theta.sin(), 0.0, theta.cos()) * sign;
                let facing = agent.transform().rotation * Vec3::x();
                assert_relative_eq!(facing, travel, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_discover_from_scene() {
        let mut scene = SceneGraph::new();
        scene.add_root(
            "pond",
            Transform::from_position(Vec3::new(30.0, -2.0, 0.0)),
            Some(Geometry::Box(AABB::from_center_extents(Vec3::zeros(), Vec3::new(10.0, 1.0, 10.0)))),
        );
        let first = scene.add_root("duck_1", Transform::identity(), None);
        scene.add_root("duck_2", Transform::identity(), None);
        scene.add_root("圖書館", Transform::identity(), None);

        let config = FlockConfig::default();
        let simulator = FlockSimulator::discover(&scene, &config);
        assert_eq!(simulator.center(), Vec3::new(30.0, -2.0, 0.0));
        assert_eq!(simulator.agents().len(), 2);
        assert_eq!(simulator.agents()[0].id, "duck_1");
        assert_eq!(simulator.agents()[0].node, Some(first));
        for agent in simulator.agents() {
            assert!((20.0..=40.0).contains(&agent.orbit_radius));
            assert!((0.1..=0.3).contains(&agent.angular_speed));
            assert_eq!(agent.position.y, 0.0);
        }

        let again = FlockSimulator::discover(&scene, &config);
        assert_eq!(simulator.agents(), again.agents());
    }

    #[test]
    fn test_flat_landmark_still_centers_orbit() {
        let mut scene = SceneGraph::new();
        scene.add_root(
            "pond",
            Transform::from_position(Vec3::new(20.0, 0.0, 5.0)),
            Some(Geometry::Box(AABB::from_center_extents(Vec3::zeros(), Vec3::new(10.0, 0.0, 10.0)))),
        );
        assert_eq!(FlockSimulator::resolve_orbit_center(&scene, "pond"), Vec3::new(20.0, 0.0, 5.0));
    }

    #[test]
    fn test_missing_landmark_orbits_origin() {
        let mut scene = SceneGraph::new();
        scene.add_root("duck", Transform::identity(), None);
        let simulator = FlockSimulator::discover(&scene, &FlockConfig::default());
        assert_eq!(simulator.center(), Vec3::zeros());
        assert_eq!(simulator.agents().len(), 1);
    }
}
