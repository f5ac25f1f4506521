//! # Faultline - Diagnostic Failure Reports
//!
//! Errors that accumulate context as they propagate, rendered call stacks,
//! and last-chance reports for signals and errors nobody handled.
//!
//! ## Features
//!
//! - `full-backtrace` (default) - Resolve symbols in captured stack traces
//!
//! ## Usage
//!
//! Install the handlers once at startup:
//!
//! ```rust,no_run
//! use faultline::{guard, install, BootstrapConfig};
//!
//! fn main() -> Result<(), faultline::BootstrapError> {
//!     let _handlers = install(&BootstrapConfig::from_env()?)?;
//!     guard(|| {
//!         // ...
//!     });
//!     Ok(())
//! }
//! ```
//!
//! Then report failures with context:
//!
//! ```rust
//! use faultline::{call_site, diag, ResultExt};
//!
//! fn write_block() -> faultline::Result<()> {
//!     Err(diag!("disk full"))
//! }
//!
//! fn flush() -> faultline::Result<()> {
//!     write_block().context_at("while flushing the journal", call_site!())
//! }
//!
//! let error = flush().unwrap_err();
//! assert!(error.describe().starts_with("disk full\n"));
//! ```

pub mod bootstrap;
pub mod config;

pub use bootstrap::{guard, install, install_panic_hook, BootstrapError, Installation};
pub use config::BootstrapConfig;

// Core API
pub use faultline_common::*;
