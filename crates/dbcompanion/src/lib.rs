//! dbcompanion: guarded session lifecycle and argument validation for
//! database-backed services.
//!
//! This facade crate re-exports the workspace and hosts the time-series
//! client guard. The library has two logical halves:
//!
//! - **Session guards** ([`SessionGuard`]): run a handler inside a session
//!   scope with commit-on-success, rollback-on-failure, close-always
//!   semantics, logging each outcome on the `relational_store` channel and
//!   converting every failure into a fixed structured reply.
//! - **Argument validators** ([`Validator`]): check a handler's bound
//!   arguments against declared parameter-type rules before invocation,
//!   short-circuiting with a `Bad Request` payload on the first mismatch.
//!
//! # Example
//!
//! ```
//! use dbcompanion::prelude::*;
//!
//! let validator = Validator::new().int("user_id");
//! let args = ArgMap::new().with("user_id", 7);
//!
//! let reply = validator.run(args, |args| {
//!     args.get("user_id").and_then(|v| v.as_int())
//! });
//! assert_eq!(reply, Ok(Some(7)));
//! ```

pub mod timeseries;

pub use dbcompanion_core::{
    ArgMap, BAD_REQUEST_MESSAGE, Error, INTERNAL_ERROR_MESSAGE, Reject, Reply, Result, Value,
    canonical_decimal,
};
pub use dbcompanion_session::{FailureDetail, GuardConfig, Session, SessionFactory, SessionGuard};
pub use dbcompanion_validate::{Expected, MissingParams, Validator};

/// Common imports for applications.
pub mod prelude {
    pub use crate::timeseries;
    pub use dbcompanion_core::{ArgMap, Error, Reject, Reply, Result, Value};
    pub use dbcompanion_session::{
        FailureDetail, GuardConfig, Session, SessionFactory, SessionGuard,
    };
    pub use dbcompanion_validate::{Expected, MissingParams, Validator};
}
