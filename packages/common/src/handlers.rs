//! Common handler functions for errors that stop propagating
//!
//! These are the catch-site counterpart of the termination handler: the
//! error is recorded and control returns to normal flow.

use crate::error::{DiagnosticError, Result};

/// Record a handled diagnostic
pub fn on_error(error: &DiagnosticError) {
    tracing::error!(target: "faultline", "Handled diagnostic:\n{error}");
}

/// Pass successful values through and record failures
///
/// Returns `None` once a failure has been recorded.
pub fn on_result<T>(result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => {
            tracing::trace!(target: "faultline", "Operation completed successfully");
            Some(value)
        }
        Err(error) => {
            on_error(&error);
            None
        }
    }
}
