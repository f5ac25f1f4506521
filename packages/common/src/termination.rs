//! Last-chance report for errors that escaped every handler
//!
//! Reaching this module means the process is done: one diagnostic is
//! emitted and the process exits with [`EXIT_FAILURE`].

use crate::call_site;
use crate::error::{logging, DiagnosticError};
use crate::trace::capture_trace;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};

/// Frames captured for the final report
pub const TERMINATION_MAX_FRAMES: usize = 50;

/// Exit status of a terminated process
pub const EXIT_FAILURE: i32 = 1;

/// Fixed first line of every termination report
pub const TERMINATION_PREFIX: &str = "[unexpected exception] backtrace:\n";

static TERMINATING: AtomicBool = AtomicBool::new(false);

/// Report an unhandled error and exit
pub fn on_unhandled_error() -> ! {
    terminate(None)
}

/// Report an unhandled error, including what escaped, and exit
pub fn on_escaped(description: &str) -> ! {
    terminate(Some(description))
}

/// Render an unwinding payload as text
#[must_use]
pub fn describe_payload(payload: &(dyn Any + Send)) -> &str {
    if let Some(error) = payload.downcast_ref::<DiagnosticError>() {
        error.describe()
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<opaque panic payload>"
    }
}

fn terminate(escaped: Option<&str>) -> ! {
    // A fault while reporting must not loop back in here
    if TERMINATING.swap(true, Ordering::SeqCst) {
        std::process::abort();
    }

    let mut report = String::from(TERMINATION_PREFIX);
    report.push_str(&capture_trace(TERMINATION_MAX_FRAMES));
    if let Some(description) = escaped {
        if !report.ends_with('\n') {
            report.push('\n');
        }
        report.push_str("[escaped error]\n");
        report.push_str(description);
    }
    let _ = DiagnosticError::new(report, call_site!(), true);

    logging::flush();
    std::process::exit(EXIT_FAILURE)
}
