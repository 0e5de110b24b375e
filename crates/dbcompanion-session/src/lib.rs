//! Session lifecycle guards.
//!
//! [`SessionGuard`] centralizes the commit/rollback/close and logging
//! boilerplate that would otherwise be duplicated in every database-backed
//! handler, and converts every failure into one structured reply so call
//! sites never handle errors themselves.
//!
//! # Design Philosophy
//!
//! - **Fresh session per call**: unless the caller supplies one, every
//!   guarded call obtains its own session from the factory. Nothing mutable
//!   is shared between concurrent calls.
//! - **Close exactly once**: the session acquired for a call is closed on
//!   every exit path, success or failure.
//! - **Non-throwing boundary**: handlers return [`Result`]; the guard turns
//!   any error into a [`Reply`] rejection per its configured policy.
//!
//! # Example
//!
//! ```ignore
//! let guard = SessionGuard::new(PgFactory::connect(url)?);
//!
//! let reply = guard.write("add_user", None, |db| {
//!     db.execute("INSERT INTO users (name) VALUES ($1)", &[name])
//! });
//! ```

use dbcompanion_core::{Error, Reject, Reply, Result};

// ============================================================================
// Collaborator Traits
// ============================================================================

/// A unit-of-work handle to a relational database connection.
///
/// Consumed as an opaque interface: the guard only ever commits, rolls back,
/// and closes. Query execution happens inside the guarded operation, against
/// whatever richer API the concrete session exposes.
pub trait Session {
    /// Commit the current unit of work.
    fn commit(&mut self) -> Result<()>;

    /// Roll back the current unit of work.
    fn rollback(&mut self) -> Result<()>;

    /// Release the underlying connection. Called exactly once per guarded
    /// call, after commit or rollback.
    fn close(&mut self) -> Result<()>;
}

/// Produces a new session on demand.
///
/// The factory is the sole owner of session lifecycle: guards ask it for a
/// fresh session per call and close what they acquired.
pub trait SessionFactory {
    /// The session type this factory produces.
    type Session: Session;

    /// Create a new session.
    fn create(&self) -> Result<Self::Session>;
}

// ============================================================================
// Guard Configuration
// ============================================================================

/// How much of an internal failure is exposed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureDetail {
    /// Replace every failure with the fixed generic message.
    #[default]
    Generic,
    /// Carry the underlying error text in the reply.
    Detailed,
}

/// Configuration for [`SessionGuard`] behavior.
#[derive(Debug, Clone, Default)]
pub struct GuardConfig {
    /// Failure-masking policy for rejected replies.
    pub failure_detail: FailureDetail,
}

// ============================================================================
// Session Guard
// ============================================================================

/// Runs handler operations inside a guarded session scope.
///
/// The write path commits on success and rolls back on failure; the read
/// path does neither. Both close the session exactly once and log the
/// outcome on the `relational_store` channel.
pub struct SessionGuard<F: SessionFactory> {
    factory: F,
    config: GuardConfig,
}

/// Scoped session ownership: closes on drop, so the session is released
/// exactly once on every exit path, unwinding included. A close failure is
/// logged and never alters the reply already produced.
struct SessionScope<'a, S: Session> {
    db: S,
    operation: &'a str,
}

impl<S: Session> Drop for SessionScope<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.db.close() {
            tracing::error!(
                target: "relational_store",
                operation = self.operation,
                error = %e,
                "failed to close session"
            );
        }
    }
}

impl<F: SessionFactory> SessionGuard<F> {
    /// Create a guard with default configuration.
    pub fn new(factory: F) -> Self {
        Self::with_config(factory, GuardConfig::default())
    }

    /// Create a guard with custom configuration.
    pub fn with_config(factory: F, config: GuardConfig) -> Self {
        Self { factory, config }
    }

    /// Get the guard configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Run a mutating operation.
    ///
    /// Acquires a session (fresh from the factory unless `db` supplies one),
    /// invokes `op`, commits on success, rolls back on failure, and closes
    /// the session in every case. Failures are logged with the operation name
    /// and converted to a rejection per the failure-detail policy.
    pub fn write<T>(
        &self,
        operation: &str,
        db: Option<F::Session>,
        op: impl FnOnce(&mut F::Session) -> Result<T>,
    ) -> Reply<T> {
        let mut scope = SessionScope {
            db: self.acquire(operation, db)?,
            operation,
        };

        let committed = match op(&mut scope.db) {
            Ok(value) => scope.db.commit().map(|()| value),
            Err(e) => Err(e),
        };

        match committed {
            Ok(value) => {
                tracing::info!(
                    target: "relational_store",
                    operation,
                    "executed successfully"
                );
                Ok(value)
            }
            Err(e) => {
                if let Err(rb) = scope.db.rollback() {
                    tracing::error!(
                        target: "relational_store",
                        operation,
                        error = %rb,
                        "rollback failed"
                    );
                }
                tracing::error!(
                    target: "relational_store",
                    operation,
                    error = %e,
                    "operation failed"
                );
                Err(self.reject(&e))
            }
        }
    }

    /// Run a read-only operation.
    ///
    /// Identical contract minus commit/rollback: invoke, log the outcome,
    /// close the session unconditionally.
    pub fn read<T>(
        &self,
        operation: &str,
        db: Option<F::Session>,
        op: impl FnOnce(&mut F::Session) -> Result<T>,
    ) -> Reply<T> {
        let mut scope = SessionScope {
            db: self.acquire(operation, db)?,
            operation,
        };

        match op(&mut scope.db) {
            Ok(value) => {
                tracing::info!(
                    target: "relational_store",
                    operation,
                    "executed successfully"
                );
                Ok(value)
            }
            Err(e) => {
                tracing::error!(
                    target: "relational_store",
                    operation,
                    error = %e,
                    "operation failed"
                );
                Err(self.reject(&e))
            }
        }
    }

    /// Use the supplied session or create a fresh one.
    fn acquire(&self, operation: &str, supplied: Option<F::Session>) -> Reply<F::Session> {
        match supplied {
            Some(db) => Ok(db),
            None => self.factory.create().map_err(|e| {
                tracing::error!(
                    target: "relational_store",
                    operation,
                    error = %e,
                    "failed to acquire session"
                );
                self.reject(&e)
            }),
        }
    }

    fn reject(&self, err: &Error) -> Reject {
        match self.config.failure_detail {
            FailureDetail::Generic => Reject::internal(),
            FailureDetail::Detailed => Reject::internal_detailed(err),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
