//! Emission of diagnostics to the installed logger
#![allow(clippy::unwrap_used, clippy::expect_used)]

use faultline_common::error::logging::LOG_TARGET;
use faultline_common::{diag_log, on_result, CallSite, DiagnosticError, DiagnosticLog};
use log::{LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};

/// A record as seen by the logger
#[derive(Debug, Clone)]
struct Captured {
    target: String,
    message: String,
    file: Option<String>,
    line: Option<u32>,
}

/// Logger keeping every record in memory
struct CaptureLogger {
    records: Mutex<Vec<Captured>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .expect("Mutex poisoned - test infrastructure failure")
            .push(Captured {
                target: record.target().to_owned(),
                message: record.args().to_string(),
                file: record.file().map(str::to_owned),
                line: record.line(),
            });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

fn install() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger in this test binary");
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Records whose message contains `marker`; tests run in parallel, so each
/// one looks only at its own marker
fn records_containing(marker: &str) -> Vec<Captured> {
    LOGGER
        .records
        .lock()
        .expect("Mutex poisoned - test infrastructure failure")
        .iter()
        .filter(|record| record.message.contains(marker))
        .cloned()
        .collect()
}

#[test]
fn logging_construction_emits_once_with_call_site() {
    install();

    let error = DiagnosticError::new(
        "journal replay failed (marker-a)",
        CallSite::new("io.cc", 42, "writeBlock"),
        true,
    );

    let records = records_containing("marker-a");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.target, LOG_TARGET);
    assert_eq!(record.message, error.describe());
    assert_eq!(record.file.as_deref(), Some("io.cc"));
    assert_eq!(record.line, Some(42));
}

#[test]
fn deferred_construction_emits_nothing() {
    install();

    let error = DiagnosticError::new(
        "disk full (marker-b)",
        CallSite::new("io.cc", 42, "writeBlock"),
        false,
    );

    assert!(records_containing("marker-b").is_empty());

    error.log(CallSite::new("handler.rs", 9, "report"));
    let records = records_containing("marker-b");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file.as_deref(), Some("handler.rs"));
    assert_eq!(records[0].line, Some(9));
}

#[test]
fn diag_log_macro_emits_at_macro_site() {
    install();

    let error = diag_log!("lease expired (marker-c)");

    let records = records_containing("marker-c");
    assert_eq!(records.len(), 1);
    assert!(records[0]
        .file
        .as_deref()
        .is_some_and(|file| file.ends_with("logging_test.rs")));
    assert_eq!(records[0].message, error.describe());
}

#[test]
fn installed_logger_is_detected() {
    install();
    assert!(DiagnosticLog::is_enabled());
}

#[test]
fn handled_results_return_to_normal_flow() {
    install();

    assert_eq!(on_result(Ok::<_, DiagnosticError>(5)), Some(5));
    let failed: faultline_common::Result<u8> =
        Err(DiagnosticError::from_message("handled (marker-d)\n"));
    assert_eq!(on_result(failed), None);
}
