use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpeedError {
    /// Requested value outside the configured bounds; carries the user-facing message.
    #[error("{0}")]
    InvalidSpeed(String),
    #[error("failed to apply speed {speed:?}: {reason}")]
    Apply { speed: f32, reason: String },
    #[error("failed to persist speed record: {0}")]
    Persist(String),
    #[error("Failed to adjust speed from {from:?} to {to:?}")]
    AdjustFailed { from: f32, to: f32, reason: String },
    #[error("failed to load speed record: {0}")]
    Load(String),
    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, SpeedError>;

/// Map a boxed collaborator error from a failed apply call.
pub fn map_apply_error(speed: f32, e: &(dyn std::error::Error + 'static)) -> SpeedError {
    SpeedError::Apply {
        speed,
        reason: e.to_string(),
    }
}

pub fn map_persist_error(e: &(dyn std::error::Error + 'static)) -> SpeedError {
    SpeedError::Persist(e.to_string())
}
