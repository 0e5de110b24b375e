//! Core types for dbcompanion.
//!
//! `dbcompanion-core` is the **foundation layer** for the workspace. It defines
//! the data types the guard and validator crates build on.
//!
//! # Role In The Architecture
//!
//! - **Data model**: [`Value`] is the dynamic runtime value for call arguments;
//!   [`ArgMap`] is the bound-argument mapping a service handler receives.
//! - **Reply contract**: [`Reply`] and [`Reject`] fix the structured payloads
//!   every guarded entry point returns instead of propagating errors.
//! - **Error taxonomy**: [`Error`] covers session, query, and conversion
//!   failures raised by collaborators.
//!
//! # Who Uses This Crate
//!
//! - `dbcompanion-session` depends on `Error` and `Reject` for the session
//!   lifecycle guards.
//! - `dbcompanion-validate` consumes `ArgMap` and `Value` to check handler
//!   arguments before invocation.
//!
//! Most applications should use the `dbcompanion` facade; reach for
//! `dbcompanion-core` directly when implementing custom collaborators.

pub mod args;
pub mod error;
pub mod response;
pub mod value;

pub use args::ArgMap;
pub use error::{Error, Result};
pub use response::{BAD_REQUEST_MESSAGE, INTERNAL_ERROR_MESSAGE, Reject, Reply};
pub use value::{Value, canonical_decimal};
