//! Bootstrap configuration

use crate::bootstrap::BootstrapError;

/// Comma-separated signal numbers to bridge, replacing the defaults
pub const SIGNALS_ENV: &str = "FAULTLINE_SIGNALS";

/// When set, no panic hook is installed
pub const NO_PANIC_HOOK_ENV: &str = "FAULTLINE_NO_PANIC_HOOK";

/// What [`install`](crate::install) registers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Signals escalated into diagnostics (ignored on non-Unix hosts)
    pub signals: Vec<i32>,
    /// Install `env_logger` as the diagnostic sink
    pub init_logging: bool,
    /// Record panic locations for reports made by [`guard`](crate::guard)
    pub panic_hook: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            signals: default_signals(),
            init_logging: true,
            panic_hook: true,
        }
    }
}

impl BootstrapConfig {
    /// Defaults overridden by [`SIGNALS_ENV`] and [`NO_PANIC_HOOK_ENV`]
    ///
    /// # Errors
    ///
    /// Returns an error if [`SIGNALS_ENV`] names an invalid or forbidden signal.
    pub fn from_env() -> Result<Self, BootstrapError> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(SIGNALS_ENV) {
            config.signals = parse_signals(&value)?;
        }
        if std::env::var_os(NO_PANIC_HOOK_ENV).is_some() {
            config.panic_hook = false;
        }
        Ok(config)
    }

    /// Replace the bridged signals
    #[must_use]
    pub fn with_signals<I: IntoIterator<Item = i32>>(mut self, signals: I) -> Self {
        self.signals = signals.into_iter().collect();
        self
    }

    /// Leave logger installation to the application
    #[must_use]
    pub fn without_logging(mut self) -> Self {
        self.init_logging = false;
        self
    }

    /// Keep the current panic hook
    #[must_use]
    pub fn without_panic_hook(mut self) -> Self {
        self.panic_hook = false;
        self
    }
}

/// Parse a comma-separated list of signal numbers
///
/// Blank entries are skipped.
///
/// # Errors
///
/// Returns [`BootstrapError::InvalidSignal`] for entries that are not numbers
/// and [`BootstrapError::ForbiddenSignal`] for signals that cannot be bridged.
pub fn parse_signals(value: &str) -> Result<Vec<i32>, BootstrapError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let signal = entry
                .parse::<i32>()
                .map_err(|_| BootstrapError::InvalidSignal(entry.to_owned()))?;
            check_bridgeable(signal)?;
            Ok(signal)
        })
        .collect()
}

#[cfg(unix)]
fn default_signals() -> Vec<i32> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
    vec![SIGHUP, SIGINT, SIGQUIT, SIGTERM]
}

#[cfg(not(unix))]
fn default_signals() -> Vec<i32> {
    Vec::new()
}

#[cfg(unix)]
fn check_bridgeable(signal: i32) -> Result<(), BootstrapError> {
    if signal <= 0 || signal_hook::consts::FORBIDDEN.contains(&signal) {
        return Err(BootstrapError::ForbiddenSignal(signal));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_bridgeable(signal: i32) -> Result<(), BootstrapError> {
    if signal <= 0 {
        return Err(BootstrapError::ForbiddenSignal(signal));
    }
    Ok(())
}
