//! Error types for simulation setup

use thiserror::Error;

/// Precondition failures raised while building a simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// Ball radius must be finite and strictly positive
    #[error("invalid ball radius: {0}")]
    InvalidRadius(f32),

    /// Arena dimensions must be finite and strictly positive
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    /// Settings failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SimError>;
