//! Escalation of OS signals into diagnostics
//!
//! The body here is what a bootstrap runs for each delivered signal. It is
//! best-effort diagnostics: it allocates and captures a trace, so it belongs
//! on a thread that receives signal notifications, not inside an
//! asynchronous handler.

use crate::call_site;
use crate::error::{CallSite, DiagnosticError};
use crate::trace::{capture_trace, DEFAULT_MAX_FRAMES};

/// Build the diagnostic for signal `signal`, captured at `site`
///
/// The report starts with `[caught signal N] backtrace:` followed by the
/// current stack. Nothing is logged; whoever ends up handling the error
/// decides that.
#[must_use]
pub fn escalate(signal: i32, site: CallSite<'_>) -> DiagnosticError {
    let mut report = format!("[caught signal {signal}] backtrace:\n");
    report.push_str(&capture_trace(DEFAULT_MAX_FRAMES));
    DiagnosticError::new(report, site, false)
}

/// Escalate `signal` and raise the result as the active error
pub fn on_signal(signal: i32) -> ! {
    escalate(signal, call_site!()).raise()
}
