//! Camera and user camera control
//!
//! Rendering itself belongs to the host; this module only owns the camera
//! state it reads and the orbit controller that lets users move it.

pub mod camera;
pub mod orbit;

pub use camera::Camera;
pub use orbit::OrbitController;
