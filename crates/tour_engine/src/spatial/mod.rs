//! Spatial queries: rays, bounding boxes and the hit-test interface
//!
//! The scene graph implements [`SpatialQuery`]; the interaction resolver
//! and the focus controller only ever talk to the trait.

pub mod primitives;
pub mod spatial_query;

pub use primitives::{Ray, Triangle, AABB};
pub use spatial_query::{RayHit, SpatialQuery};
