//! # Common Error Types
//!
//! Consolidated error handling for the dashboard access layer.
//!
//! Every failure a page can observe is an [`AppError`]. The request wrapper produces
//! them, service functions propagate them unchanged, and remote collections store
//! their display text together with an [`ErrorKind`] so the UI can route on the kind
//! (for example sending the user to credential setup on [`ErrorKind::Unauthenticated`]).
//!
//! ## Error Categories
//!
//! - **Credentials**: `Unauthenticated` (nothing was sent) vs `Unauthorized` (what was
//!   sent got rejected)
//! - **Transport**: `Network`, `Timeout` - the server never answered
//! - **Server**: `Api` (non-2xx with a message), `Rejected` (2xx with `status: false`)
//! - **Shape**: `MalformedResponse` - body did not match the envelope
//! - **Client**: `Cancelled`, `Validation`, `Config`, `Unsupported`
//!
//! ## Usage Pattern
//!
//! ```rust
//! use dashboard::core::error::{AppError, ErrorKind};
//!
//! let err = AppError::Api { status: 500, message: "Database unavailable".to_string() };
//! assert_eq!(err.kind(), ErrorKind::Server);
//! assert_eq!(err.status(), Some(500));
//! ```

use std::time::Duration;

use shared::EnvelopeError;
use thiserror::Error;

/// Dashboard-wide error type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// The server refused a request that was sent without credentials.
    ///
    /// Distinct from [`AppError::Unauthorized`] so the UI can open the credential
    /// setup flow instead of reporting bad credentials.
    #[error("API credentials are not configured")]
    Unauthenticated,

    /// The server rejected the credentials that were sent (HTTP 401/403).
    #[error("Invalid credentials ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The request never reached the server, or no response arrived.
    #[error("Could not reach server: {0}")]
    Network(String),

    /// The per-call deadline elapsed before a response arrived.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-2xx response; `message` is the server's text, passed through verbatim.
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP success carrying `status: false`.
    #[error("{0}")]
    Rejected(String),

    /// The body did not match the expected envelope.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// Invalid client-side input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The resource does not offer this operation.
    #[error("Not supported: {0}")]
    Unsupported(&'static str),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Coarse category of an [`AppError`], cheap to copy into view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthenticated,
    Unauthorized,
    Transport,
    Server,
    Rejected,
    Malformed,
    Cancelled,
    Client,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Unauthenticated => ErrorKind::Unauthenticated,
            AppError::Unauthorized { .. } => ErrorKind::Unauthorized,
            AppError::Network(_) | AppError::Timeout(_) => ErrorKind::Transport,
            AppError::Api { .. } => ErrorKind::Server,
            AppError::Rejected(_) => ErrorKind::Rejected,
            AppError::MalformedResponse(_) => ErrorKind::Malformed,
            AppError::Cancelled => ErrorKind::Cancelled,
            AppError::Validation(_) | AppError::Config(_) | AppError::Unsupported(_) => {
                ErrorKind::Client
            }
        }
    }

    /// HTTP status carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Unauthorized { status, .. } | AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 404 from the server.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The server could not be reached at all.
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// The UI should send the user to the credential setup flow.
    pub fn needs_credentials(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Unauthenticated | ErrorKind::Unauthorized
        )
    }

    /// Map an HTTP failure status and message, taking into account whether
    /// credentials were attached to the request.
    pub fn from_status(status: u16, message: String, sent_credentials: bool) -> Self {
        match status {
            401 | 403 if !sent_credentials => AppError::Unauthenticated,
            401 | 403 => AppError::Unauthorized { status, message },
            _ => AppError::Api { status, message },
        }
    }
}

impl From<EnvelopeError> for AppError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected(msg) => AppError::Rejected(msg),
            EnvelopeError::MissingData => AppError::MalformedResponse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_depend_on_sent_credentials() {
        assert_eq!(
            AppError::from_status(403, "nope".into(), false),
            AppError::Unauthenticated
        );
        assert_eq!(
            AppError::from_status(401, "bad key".into(), true),
            AppError::Unauthorized {
                status: 401,
                message: "bad key".into()
            }
        );
        assert_eq!(
            AppError::from_status(500, "boom".into(), true).kind(),
            ErrorKind::Server
        );
    }

    #[test]
    fn test_not_found_detection() {
        assert!(AppError::from_status(404, "missing".into(), true).is_not_found());
        assert!(!AppError::Network("refused".into()).is_not_found());
    }

    #[test]
    fn test_transport_kinds() {
        assert!(AppError::Network("dns".into()).is_transport());
        assert!(AppError::Timeout(Duration::from_secs(30)).is_transport());
        assert!(!AppError::Api {
            status: 502,
            message: "bad gateway".into()
        }
        .is_transport());
    }

    #[test]
    fn test_envelope_errors_map_to_distinct_kinds() {
        let rejected: AppError = EnvelopeError::Rejected("Duplicate".into()).into();
        assert_eq!(rejected.kind(), ErrorKind::Rejected);
        assert_eq!(rejected.to_string(), "Duplicate");

        let missing: AppError = EnvelopeError::MissingData.into();
        assert_eq!(missing.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_display_is_never_empty() {
        let errors = [
            AppError::Unauthenticated,
            AppError::Cancelled,
            AppError::Timeout(Duration::from_millis(5)),
            AppError::Unsupported("statistics"),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
