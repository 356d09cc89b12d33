use thiserror::Error;

/// Errors surfaced by worksheet backends.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("worksheet `{0}` does not exist")]
    UnknownSheet(String),

    /// Catch-all for backend-specific failures (remote API, decode, ...).
    #[error("worksheet backend error: {0}")]
    Backend(String),
}
