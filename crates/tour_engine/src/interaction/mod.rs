//! Pointer interaction with registered scene entities
//!
//! Hits are reported against leaf geometry while interactions are defined
//! per building, so every pick climbs from the struck primitive to its
//! nearest registered ancestor.

mod entity;
mod resolver;

pub use entity::{EntityId, EntityRegistry, InteractiveEntity};
pub use resolver::{HoverResult, InteractionResolver};
