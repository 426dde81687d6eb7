//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by [`CampusTour`](crate::tour::CampusTour) setup and API calls
#[derive(Debug, Error)]
pub enum TourError {
    /// Configuration failed to load or validate
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An id that was never registered as an interactive entity
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// The scene cannot host a tour
    #[error("Scene error: {0}")]
    Scene(String),
}
