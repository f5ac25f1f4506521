//! Termination reports, observed from a child copy of this test binary
//!
//! The termination handler exits the process, so each scenario re-runs this
//! binary filtered to a single child test that only acts when
//! `FAULTLINE_TERMINATION_CHILD` names it.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use faultline_common::termination::{EXIT_FAILURE, TERMINATION_PREFIX};
use faultline_common::{describe_payload, on_escaped, on_unhandled_error, DiagnosticError};
use std::any::Any;
use std::env;
use std::process::{Command, Output};

const CHILD_ENV: &str = "FAULTLINE_TERMINATION_CHILD";

fn is_child(name: &str) -> bool {
    env::var(CHILD_ENV).as_deref() == Ok(name)
}

fn run_child(name: &str) -> Output {
    Command::new(env::current_exe().expect("test binary path"))
        .args(["--exact", name, "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, name)
        .env_remove("RUST_LOG")
        .output()
        .expect("child test binary runs")
}

#[test]
fn unhandled_error_child() {
    if is_child("unhandled_error_child") {
        on_unhandled_error();
    }
}

#[test]
fn escaped_error_child() {
    if is_child("escaped_error_child") {
        on_escaped("disk full\n\n{io.cc::writeBlock() [line:42]}");
    }
}

#[test]
fn unhandled_error_exits_with_one_report() {
    let output = run_child("unhandled_error_child");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(EXIT_FAILURE), "stderr: {stderr}");
    assert_eq!(stderr.matches(TERMINATION_PREFIX).count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("::terminate() [line:"));
}

#[test]
fn escaped_error_is_part_of_the_report() {
    let output = run_child("escaped_error_child");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(EXIT_FAILURE), "stderr: {stderr}");
    assert_eq!(stderr.matches(TERMINATION_PREFIX).count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("[escaped error]\ndisk full\n\n{io.cc::writeBlock() [line:42]}"));
}

#[test]
fn payloads_are_described() {
    let diagnostic: Box<dyn Any + Send> = Box::new(DiagnosticError::from_message("raised\n"));
    assert_eq!(describe_payload(&*diagnostic), "raised\n");

    let literal: Box<dyn Any + Send> = Box::new("literal panic");
    assert_eq!(describe_payload(&*literal), "literal panic");

    let formatted: Box<dyn Any + Send> = Box::new(format!("formatted {}", 3));
    assert_eq!(describe_payload(&*formatted), "formatted 3");

    let opaque: Box<dyn Any + Send> = Box::new(42_u8);
    assert_eq!(describe_payload(&*opaque), "<opaque panic payload>");
}
