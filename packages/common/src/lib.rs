//! Core diagnostics for the faultline project
//!
//! This crate provides the pieces a failure report is built from:
//! - [`DiagnosticError`], an error value that accumulates context as it
//!   propagates
//! - Best-effort stack trace capture rendered as text
//! - The handler body that escalates OS signals into diagnostics
//! - The termination handler for errors that escape every catch site
//!
//! Registering the handlers with the OS and the runtime is left to the
//! `faultline` crate.

pub mod error;
pub mod handlers;
pub mod signal;
pub mod termination;
pub mod trace;

pub use error::*;
pub use handlers::{on_error, on_result};
pub use signal::{escalate, on_signal};
pub use termination::{describe_payload, on_escaped, on_unhandled_error};
pub use trace::{capture_trace, TraceCapture};
