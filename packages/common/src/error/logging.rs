//! Diagnostic emission through the `log` facade
//!
//! Reports are emitted as a single `Error` record carrying the call-site
//! file and line. Timestamping and sink routing belong to whichever logger the
//! process installed; [`DiagnosticLog::init`] installs `env_logger` for
//! processes that have none.

use super::types::CallSite;
use log::{info, Level, Metadata, Record};
use std::io::Write;
use std::sync::Once;

/// Target used for every emitted diagnostic record
pub const LOG_TARGET: &str = "faultline";

static INIT_LOGGER: Once = Once::new();

/// Logging setup for processes reporting diagnostics
pub struct DiagnosticLog;

impl DiagnosticLog {
    /// Initialize logging (should be called once at application startup)
    ///
    /// This sets up `env_logger` with microsecond timestamps.
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=error` - Only diagnostics and other errors
    /// - `RUST_LOG=info` - Also startup and installation events
    /// - `RUST_LOG=faultline=error` - Only this crate's records
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            // Another logger may already own the facade; keep it
            if env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .try_init()
                .is_ok()
            {
                info!(target: LOG_TARGET, "Diagnostic logging initialized");
            }
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Whether a logger will accept diagnostic records
    #[must_use]
    pub fn is_enabled() -> bool {
        Level::Error <= log::max_level() && log::logger().enabled(&Self::metadata())
    }

    fn metadata() -> Metadata<'static> {
        Metadata::builder()
            .level(Level::Error)
            .target(LOG_TARGET)
            .build()
    }
}

/// Emit `text` as one error record tagged with `site`
///
/// With no logger accepting the record, the text goes straight to stderr so
/// the report is never silently lost.
pub fn emit(text: &str, site: CallSite<'_>) {
    if DiagnosticLog::is_enabled() {
        log::logger().log(
            &Record::builder()
                .metadata(DiagnosticLog::metadata())
                .args(format_args!("{text}"))
                .file(Some(site.file))
                .line(Some(site.line))
                .module_path(None)
                .build(),
        );
    } else {
        write_stderr(text);
    }
}

/// Flush the installed logger
pub fn flush() {
    log::logger().flush();
}

/// Last-resort sink; write failures are ignored
pub(crate) fn write_stderr(text: &str) {
    let mut stderr = std::io::stderr().lock();
    let _ = stderr.write_all(text.as_bytes());
    if !text.ends_with('\n') {
        let _ = stderr.write_all(b"\n");
    }
    let _ = stderr.flush();
}
