use thiserror::Error;

/// Errors surfaced by the platform's cloud-account API.
///
/// `Duplicate` and `NotFound` are the two distinguished signals the
/// lifecycle layer handles specially; everything else is fatal and
/// surfaced verbatim.
///
/// SECURITY: Error messages must NEVER contain sensitive data like API
/// tokens or account credentials.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Authentication failed (invalid or expired token)
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An account with the same identity already exists on the platform
    #[error("cloud account already exists: '{name}'")]
    Duplicate { name: String },

    /// The requested object does not exist (or is not visible)
    #[error("not found: {what}")]
    NotFound { what: String },

    /// Response body did not match the expected shape
    #[error("failed to decode platform response: {message}")]
    Decode { message: String },
}
