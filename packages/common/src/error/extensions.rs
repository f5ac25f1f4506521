//! Extension traits for attaching context while errors propagate

use super::types::{CallSite, DiagnosticError, Result};
use std::fmt;

/// Context attachment for results already carrying a [`DiagnosticError`]
///
/// Each method leaves `Ok` values untouched.
pub trait ResultExt<T> {
    /// Append a call-site annotation for the frame the error passes through
    fn at(self, site: CallSite<'_>) -> Result<T>;

    /// Append a line of context
    fn context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// Append a line of context and the call-site it was added at
    fn context_at<C: fmt::Display>(self, context: C, site: CallSite<'_>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn at(self, site: CallSite<'_>) -> Result<T> {
        self.map_err(|mut error| {
            error.append_call_site(site);
            error
        })
    }

    fn context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|error| error.context(context))
    }

    fn context_at<C: fmt::Display>(self, context: C, site: CallSite<'_>) -> Result<T> {
        self.map_err(|mut error| {
            error.append_with_call_site(context.to_string(), site);
            error
        })
    }
}

/// Conversion of foreign errors into diagnostics
pub trait IntoDiagnostic<T> {
    /// Wrap the error's display text in a diagnostic raised at `site`
    fn diagnose(self, site: CallSite<'_>) -> Result<T>;
}

impl<T, E> IntoDiagnostic<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn diagnose(self, site: CallSite<'_>) -> Result<T> {
        self.map_err(|error| DiagnosticError::new(error, site, false))
    }
}

/// Turning a missing value into a diagnostic
pub trait OptionExt<T> {
    /// Return the value or a diagnostic with `message` raised at `site`
    fn ok_or_diag<M: fmt::Display>(self, message: M, site: CallSite<'_>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_diag<M: fmt::Display>(self, message: M, site: CallSite<'_>) -> Result<T> {
        self.ok_or_else(|| DiagnosticError::new(message, site, false))
    }
}
