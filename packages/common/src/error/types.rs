//! Core diagnostic types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error value that accumulates context while it propagates
///
/// The whole report lives in a single growable message. Each append adds
/// text after what is already there; nothing is ever reordered, deduplicated
/// or truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct DiagnosticError {
    /// The accumulated report text
    pub(super) message: String,
}

/// Source location of a construction or append point
///
/// Usually produced by [`call_site!`](crate::call_site) rather than by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite<'a> {
    /// Source file path
    pub file: &'a str,
    /// 1-based line number
    pub line: u32,
    /// Bare name of the enclosing function
    pub function: &'a str,
}

impl<'a> CallSite<'a> {
    /// Create a call-site from its three parts
    #[must_use]
    pub const fn new(file: &'a str, line: u32, function: &'a str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

impl fmt::Display for CallSite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}::{}() [line:{}]}}",
            self.file, self.function, self.line
        )
    }
}

/// Result type alias using [`DiagnosticError`]
pub type Result<T> = std::result::Result<T, DiagnosticError>;
