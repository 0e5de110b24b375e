//! Structured reply payloads.
//!
//! Guarded entry points never propagate errors to the caller; they return a
//! [`Reply`] whose error arm is one of three fixed payload shapes:
//!
//! - `{"message": "..."}` from the session lifecycle guards,
//! - `{"message": "Error in <op>: <text>", "status": "error"}` from the
//!   time-series guard,
//! - `{"message": "Bad Request", "errors": ["..."]}` from the validators.

use std::fmt;

use serde::Serialize;

/// User-facing text for a masked internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Message carried by every validation rejection.
pub const BAD_REQUEST_MESSAGE: &str = "Bad Request";

/// Reply from a guarded entry point: the handler's value or a rejection
/// payload. No other outcome exists at the service boundary.
pub type Reply<T> = std::result::Result<T, Reject>;

/// A structured rejection payload.
///
/// Serializes untagged, so each variant produces exactly its fixed JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reject {
    /// Internal failure from a session-guarded operation.
    Internal {
        /// Masked or detailed failure text, per guard policy.
        message: String,
    },
    /// Failure from an external client call.
    Client {
        /// `Error in <operation>: <detail>`.
        message: String,
        /// Always `"error"`.
        status: String,
    },
    /// Argument validation failure; the handler was never invoked.
    BadRequest {
        /// Always `"Bad Request"`.
        message: String,
        /// Human-readable reasons; short-circuit means exactly one entry.
        errors: Vec<String>,
    },
}

impl Reject {
    /// Internal failure with the fixed masking message.
    pub fn internal() -> Self {
        Self::Internal {
            message: INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Internal failure carrying the underlying error text.
    pub fn internal_detailed(detail: impl fmt::Display) -> Self {
        Self::Internal {
            message: detail.to_string(),
        }
    }

    /// External-client failure for the named operation.
    pub fn client(operation: &str, detail: impl fmt::Display) -> Self {
        Self::Client {
            message: format!("Error in {operation}: {detail}"),
            status: "error".to_string(),
        }
    }

    /// Validation rejection with a single reason.
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest {
            message: BAD_REQUEST_MESSAGE.to_string(),
            errors: vec![reason.into()],
        }
    }

    /// The payload's message text.
    pub fn message(&self) -> &str {
        match self {
            Self::Internal { message }
            | Self::Client { message, .. }
            | Self::BadRequest { message, .. } => message,
        }
    }

    /// Validation reasons, empty for non-validation payloads.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::BadRequest { errors, .. } => errors,
            _ => &[],
        }
    }
}
