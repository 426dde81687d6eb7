//! # Core Module
//!
//! Shared configuration consumed by every viewer subsystem.

pub mod config;

pub use config::{
    TourConfig,
    TransitionConfig,
    FlockConfig,
    CameraConfig,
    SceneConfig,
};
pub use crate::config::{Config, ConfigError};
