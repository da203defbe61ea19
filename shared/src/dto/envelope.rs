//! # Response Envelopes
//!
//! Every endpoint of the partner API wraps its payload in the same envelope:
//!
//! ```text
//! { "status": true,  "data": { ... } }
//! { "status": false, "data": null, "message": "Partner already exists" }
//! ```
//!
//! [`ApiResponse::into_result`] turns the boolean flag into a tagged result so callers
//! cannot read `data` without handling the rejection branch.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub status: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Why an envelope could not be turned into a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// `status: false`; the server's message, or a generic one when it sent none.
    Rejected(String),
    /// `status: true` but `data` is missing and the payload type is not nullable.
    MissingData,
}

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EnvelopeError::Rejected(msg) => write!(fmt, "request rejected: {msg}"),
            EnvelopeError::MissingData => write!(fmt, "envelope is missing `data`"),
        }
    }
}

impl std::error::Error for EnvelopeError {}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            status: true,
            data: Some(data),
            message: None,
        }
    }

    /// Rejected envelope carrying only a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Convert the envelope into the payload or the reason it has none.
    ///
    /// A `null`/absent `data` on a successful envelope is accepted only when `T` can
    /// itself be decoded from `null` (for example `()` or `Option<_>`), which is how
    /// mutation endpoints without a body are modelled.
    pub fn into_result(self) -> Result<T, EnvelopeError> {
        if !self.status {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "request was rejected by the server".to_string());
            return Err(EnvelopeError::Rejected(message));
        }

        match self.data {
            Some(data) => Ok(data),
            None => serde_json::from_value(serde_json::Value::Null)
                .map_err(|_| EnvelopeError::MissingData),
        }
    }
}

/// Error body shape returned alongside non-2xx statuses.
///
/// The API is not consistent about the field name, so both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// First non-empty message the server provided.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.as_deref().filter(|m| !m.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_envelope_carries_message() {
        let env: ApiResponse<String> =
            serde_json::from_str(r#"{"status":false,"data":null,"message":"Duplicate email"}"#)
                .unwrap();
        assert_eq!(
            env.into_result(),
            Err(EnvelopeError::Rejected("Duplicate email".to_string()))
        );
    }

    #[test]
    fn test_rejected_envelope_without_message_gets_generic_text() {
        let env: ApiResponse<String> = serde_json::from_str(r#"{"status":false}"#).unwrap();
        match env.into_result() {
            Err(EnvelopeError::Rejected(msg)) => assert!(!msg.is_empty()),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_missing_data_is_reported() {
        let env: ApiResponse<String> = serde_json::from_str(r#"{"status":true}"#).unwrap();
        assert_eq!(env.into_result(), Err(EnvelopeError::MissingData));
    }

    #[test]
    fn test_unit_payload_accepts_null_data() {
        let env: ApiResponse<()> = serde_json::from_str(r#"{"status":true,"data":null}"#).unwrap();
        assert_eq!(env.into_result(), Ok(()));
    }

    #[test]
    fn test_missing_status_fails_to_decode() {
        let parsed = serde_json::from_str::<ApiResponse<String>>(r#"{"data":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_error_response_prefers_message() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"message":"Forbidden","error":"ignored"}"#).unwrap();
        assert_eq!(body.text(), Some("Forbidden"));

        let body: ErrorResponse = serde_json::from_str(r#"{"error":"Bad key"}"#).unwrap();
        assert_eq!(body.text(), Some("Bad key"));

        let body: ErrorResponse = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.text(), None);
    }
}
