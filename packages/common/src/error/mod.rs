//! Accumulating diagnostic errors
//!
//! Provides the error value the rest of the crate reports through:
//! - A single growable report with append-only context
//! - Call-site annotations for every frame that touches it
//! - Optional emission to the `log` facade at construction
//! - Extension traits for attaching context during `?` propagation

pub mod constructors;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;

// Re-export all public types and traits
pub use extensions::{IntoDiagnostic, OptionExt, ResultExt};
pub use logging::DiagnosticLog;
pub use types::{CallSite, DiagnosticError, Result};
