//! # API Error Types
//!
//! Error types for calls to the external ERP API.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  atlas-core validation (before any network call)                       │
//! │       │  CoreError → ApiError::Core, request never sent                │
//! │       ▼                                                                 │
//! │  reqwest failure (connect, timeout, TLS)                               │
//! │       │  → ApiError::Transport - outcome UNKNOWN, caller refreshes     │
//! │       ▼                                                                 │
//! │  HTTP status mapping                                                   │
//! │       │  401 → Auth (session force-cleared)                            │
//! │       │  403 → Forbidden        404 → NotFound                         │
//! │       │  409/422 → Conflict (server rejected the transition)           │
//! │       │  other  → Server { status, message }                           │
//! │       ▼                                                                 │
//! │  Console displays a message naming the entity and operation            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no silent retry anywhere: a failed mutating call surfaces
//! verbatim, and the caller reconciles by refetching.

use thiserror::Error;

use atlas_core::CoreError;

/// Errors surfaced by the API access layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-side validation or lifecycle failure. The request was never
    /// sent to the server.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// The token is expired or invalid (HTTP 401).
    ///
    /// The session has already been cleared by the time this surfaces;
    /// the only recovery is signing in again.
    #[error("Session expired or invalid, sign in again")]
    Auth,

    /// The server refused the operation for this role (HTTP 403).
    #[error("Not permitted: {0}")]
    Forbidden(String),

    /// The referenced entity does not exist on the server (HTTP 404).
    #[error("{0}")]
    NotFound(String),

    /// The server rejected a state transition (HTTP 409 / 422), e.g. an
    /// approval raced with another user's change.
    #[error("{0}")]
    Conflict(String),

    /// Any other non-success response.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request never completed. The operation may or may not have
    /// reached the server; the caller must refresh before retrying.
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body was not what we expected.
    #[error("Could not decode server response: {0}")]
    Decode(String),
}

impl From<atlas_core::ValidationError> for ApiError {
    fn from(err: atlas_core::ValidationError) -> Self {
        ApiError::Core(err.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::ValidationError;

    #[test]
    fn test_core_errors_wrap_with_message_intact() {
        let core: CoreError = ValidationError::MustBePositive { field: "quantity" }.into();
        let api: ApiError = core.into();
        assert_eq!(api.to_string(), "Validation error: quantity must be positive");
    }

    #[test]
    fn test_server_error_message() {
        let err = ApiError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (500): boom");
    }
}
