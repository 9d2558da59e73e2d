use thiserror::Error;

/// Error type for JWT operations.
///
/// Validation failures are deliberately collapsed into `InvalidToken`:
/// malformed, forged and expired tokens are indistinguishable to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Secret key too short: minimum {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("Token validity window must be positive")]
    InvalidValidity,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    InvalidToken,
}
