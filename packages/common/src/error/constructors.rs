//! Diagnostic constructors and append operations

use super::logging;
use super::types::{CallSite, DiagnosticError};
use std::fmt::{self, Write as _};

impl DiagnosticError {
    /// Create a diagnostic from a message and the site that raised it
    ///
    /// The text starts as `message` followed by a newline, then gets one
    /// call-site annotation. With `log` set, the finished text is handed to
    /// the logging collaborator once. Leave it unset when the error will be
    /// re-wrapped further up, so the report is not logged twice.
    #[must_use]
    pub fn new<M: fmt::Display>(message: M, site: CallSite<'_>, log: bool) -> Self {
        let mut error = Self {
            message: format!("{message}\n"),
        };
        error.append_call_site(site);
        if log {
            error.log(site);
        }
        error
    }

    /// Rebuild a diagnostic from previously rendered text, verbatim
    #[must_use]
    pub fn from_message<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Append a line of context
    pub fn append<S: AsRef<str>>(&mut self, more: S) -> &mut Self {
        self.message.push_str(more.as_ref());
        self.message.push('\n');
        self
    }

    /// Append a `{file::function() [line:N]}` annotation on its own line
    pub fn append_call_site(&mut self, site: CallSite<'_>) -> &mut Self {
        self.message.push('\n');
        // Writing into a String cannot fail
        let _ = write!(self.message, "{site}");
        self
    }

    /// Append a line of context followed by a call-site annotation
    pub fn append_with_call_site<S: AsRef<str>>(
        &mut self,
        more: S,
        site: CallSite<'_>,
    ) -> &mut Self {
        self.append(more).append_call_site(site)
    }

    /// Consuming form of [`append`](Self::append) for `map_err` chains
    #[must_use]
    pub fn context<C: fmt::Display>(mut self, context: C) -> Self {
        self.append(context.to_string());
        self
    }

    /// The full accumulated report
    #[must_use]
    pub fn describe(&self) -> &str {
        &self.message
    }

    /// Read the stored text
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace the stored text, bypassing the append convention
    pub fn set_message<S: Into<String>>(&mut self, message: S) {
        self.message = message.into();
    }

    /// Take the stored text
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }

    /// Hand the report to the logging collaborator, tagged with `site`
    pub fn log(&self, site: CallSite<'_>) {
        logging::emit(&self.message, site);
    }

    /// Raise this diagnostic through the unwinding mechanism
    ///
    /// The payload can be recovered with `catch_unwind` and
    /// `downcast::<DiagnosticError>()`.
    #[track_caller]
    pub fn raise(self) -> ! {
        std::panic::panic_any(self)
    }
}

impl From<DiagnosticError> for String {
    fn from(error: DiagnosticError) -> Self {
        error.message
    }
}
