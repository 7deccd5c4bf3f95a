/// Convenience result type used across slideway.
pub type SlidewayResult<T> = Result<T, SlidewayError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The engine prefers silent, idempotent no-ops over errors for expected edge
/// cases (disposing twice, releasing a drag that never started, propagating to
/// an absent sync set). Errors are reserved for construction-time problems.
#[derive(thiserror::Error, Debug)]
pub enum SlidewayError {
    /// Invalid registration or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A programming error in how the engine is driven.
    ///
    /// Expected to surface during development, never in production, and never
    /// caught and retried.
    #[error("misuse error: {0}")]
    Misuse(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidewayError {
    /// Build a [`SlidewayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlidewayError::Misuse`] value.
    pub fn misuse(msg: impl Into<String>) -> Self {
        Self::Misuse(msg.into())
    }
}
