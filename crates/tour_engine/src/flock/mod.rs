//! Ambient agents circling the orbit center
//!
//! Each agent follows its own circular orbit; agents that drift within the
//! safe distance of one another are pushed apart softly every tick.

mod agent;
mod simulator;

pub use agent::{Agent, OrbitDirection};
pub use simulator::{FlockSimulator, RepulsionMode};
