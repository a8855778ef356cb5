//! Error types for chain construction and persistence.

use thiserror::Error;

/// Convenience alias for results within the core crate.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors raised while constructing, loading or saving a reasoning chain.
///
/// These are caller-misuse failures. Structural defects such as dangling
/// dependencies or cycles are never reported here; they are surfaced as data by
/// the detector.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("confidence {value} for step '{step_id}' is outside [0.0, 1.0]")]
    ConfidenceOutOfRange { step_id: String, value: f64 },

    #[error("step '{0}' already exists in chain")]
    DuplicateStep(String),

    #[error("unknown step type '{0}'")]
    UnknownKind(String),

    #[error("chain JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
