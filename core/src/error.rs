//! Error types for the Namecheap API client.
//!
//! # Design
//! Each failure stage gets its own variant so callers can tell a malformed
//! response (`Decode`) apart from a well-formed vendor error (`Api`), and both
//! apart from a request that never reached the server (`Transport`) or was
//! rejected before being built (`Validation`, `MissingConfig`).

use thiserror::Error;

/// One `<Error Number="...">message</Error>` entry from the response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub code: String,
    pub message: String,
}

/// Errors returned by `NamecheapClient` and its transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A credential or the endpoint was empty at construction time.
    #[error("missing required configuration value: {0}")]
    MissingConfig(&'static str),

    /// A request argument failed client-side validation; nothing was sent.
    #[error("invalid request field {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The body is not a well-formed response envelope.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The envelope reported `Status="ERROR"` or carried error entries.
    /// `code` and `message` come from the first entry.
    #[error("API error {code}: {message}")]
    Api {
        code: String,
        message: String,
        errors: Vec<ErrorEntry>,
    },
}

impl ApiError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The vendor error number, when this is an `Api` error.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            ApiError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<quick_xml::DeError> for ApiError {
    fn from(err: quick_xml::DeError) -> Self {
        ApiError::Decode(err.to_string())
    }
}
