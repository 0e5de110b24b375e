//! Error guard for time-series client calls.
//!
//! The time-series client is an external collaborator; only its failures are
//! observed here. No resource is owned, so there is nothing to clean up and
//! nothing is retried: a failure is logged on the `time_series_store` channel
//! and converted to the client-shaped rejection payload.

use std::fmt::Display;

use dbcompanion_core::{Reject, Reply};

/// Run a time-series client call, converting any failure into a structured
/// reply.
///
/// On success the call's value passes through unchanged. On failure the reply
/// is `{"message": "Error in <operation>: <detail>", "status": "error"}`.
///
/// # Example
///
/// ```
/// use dbcompanion::timeseries;
///
/// let reply = timeseries::guard("write_points", || Ok::<_, String>(204));
/// assert_eq!(reply, Ok(204));
/// ```
pub fn guard<T, E: Display>(
    operation: &str,
    op: impl FnOnce() -> std::result::Result<T, E>,
) -> Reply<T> {
    match op() {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(
                target: "time_series_store",
                operation,
                error = %e,
                "client call failed"
            );
            Err(Reject::client(operation, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_passes_value_through() {
        let reply = guard("write_points", || Ok::<_, String>(vec![1, 2]));
        assert_eq!(reply, Ok(vec![1, 2]));
    }

    #[test]
    fn test_failure_becomes_client_payload() {
        let reply: Reply<()> = guard("write_points", || Err("connection timeout"));

        assert_eq!(
            reply,
            Err(Reject::client("write_points", "connection timeout"))
        );
        assert_eq!(
            reply.unwrap_err().message(),
            "Error in write_points: connection timeout"
        );
    }
}
