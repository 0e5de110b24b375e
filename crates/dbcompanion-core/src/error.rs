//! Error taxonomy shared across the workspace.
//!
//! Collaborator failures (session operations, queries, conversions) are
//! normalized into one enum so the guards can log and convert them uniformly.

use std::fmt;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by sessions, factories, and value handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The factory could not produce a session.
    Connection(String),
    /// Committing the session failed.
    Commit(String),
    /// Rolling back the session failed.
    Rollback(String),
    /// Closing the session failed.
    Close(String),
    /// A statement or query failed inside a guarded operation.
    Query(String),
    /// A value could not be interpreted as a decimal.
    Decimal(String),
    /// Catch-all for application-defined failures.
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "connection error: {msg}"),
            Self::Commit(msg) => write!(f, "commit failed: {msg}"),
            Self::Rollback(msg) => write!(f, "rollback failed: {msg}"),
            Self::Close(msg) => write!(f, "close failed: {msg}"),
            Self::Query(msg) => write!(f, "query failed: {msg}"),
            Self::Decimal(msg) => write!(f, "invalid decimal: {msg}"),
            Self::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create a custom error from any displayable detail.
    pub fn custom(detail: impl fmt::Display) -> Self {
        Self::Custom(detail.to_string())
    }
}
