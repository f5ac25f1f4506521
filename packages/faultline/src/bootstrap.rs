//! One-time registration of the fault handlers

use crate::config::BootstrapConfig;
use faultline_common::error::logging::LOG_TARGET;
use faultline_common::{describe_payload, on_escaped, DiagnosticLog};
use std::cell::Cell;
use std::panic::{self, UnwindSafe};
use thiserror::Error;

/// Errors raised while configuring or installing the fault handlers
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A signal list entry is not a number
    #[error("invalid signal number `{0}`")]
    InvalidSignal(String),

    /// The signal cannot have a handler installed
    #[error("signal {0} cannot be bridged")]
    ForbiddenSignal(i32),

    /// Registering with the OS failed
    #[error("failed to register signal handlers")]
    SignalRegistration(#[source] std::io::Error),

    /// The signal thread could not be started
    #[error("failed to spawn the signal thread")]
    ThreadSpawn(#[source] std::io::Error),
}

/// Handlers registered by [`install`]
///
/// Dropping it stops the signal thread. The panic hook stays in place.
#[derive(Debug, Default)]
pub struct Installation {
    #[cfg(unix)]
    bridge: Option<unix::SignalThread>,
}

impl Installation {
    /// Whether a signal thread is running
    #[cfg(unix)]
    #[must_use]
    pub fn bridges_signals(&self) -> bool {
        self.bridge.is_some()
    }

    /// Whether a signal thread is running
    #[cfg(not(unix))]
    #[must_use]
    pub fn bridges_signals(&self) -> bool {
        false
    }

    /// Stop the signal thread and wait for it to exit
    pub fn shutdown(self) {
        drop(self);
    }
}

/// Register the handlers described by `config`
///
/// Call once during process startup, then run the rest of `main` inside
/// [`guard`] so a panic that nothing handles is reported.
///
/// # Errors
///
/// Returns an error if the signal handlers cannot be registered or the
/// signal thread cannot be spawned.
pub fn install(config: &BootstrapConfig) -> Result<Installation, BootstrapError> {
    if config.init_logging {
        DiagnosticLog::init();
    }
    if config.panic_hook {
        install_panic_hook();
    }

    #[allow(unused_mut)]
    let mut installation = Installation::default();

    #[cfg(unix)]
    if !config.signals.is_empty() {
        installation.bridge = Some(unix::SignalThread::spawn(&config.signals)?);
    }
    #[cfg(not(unix))]
    if !config.signals.is_empty() {
        log::warn!(target: LOG_TARGET, "Signal bridging is not supported on this platform");
    }

    log::info!(
        target: LOG_TARGET,
        "Fault handlers installed (signals: {:?}, panic hook: {})",
        config.signals,
        config.panic_hook
    );
    Ok(installation)
}

/// Record where each panic started, for the boundary that reports it
///
/// The hook does not end the process and prints nothing, so a panic caught
/// by `catch_unwind` anywhere stays recoverable. A panic that reaches
/// [`guard`] is reported with the recorded location appended.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        if let Some(location) = info.location() {
            let location = format!(
                "[panicked at {}:{}:{}]",
                location.file(),
                location.line(),
                location.column()
            );
            log::debug!(target: LOG_TARGET, "Unwinding from {location}");
            PANIC_LOCATION.with(|slot| slot.set(Some(location)));
        }
    }));
}

thread_local! {
    static PANIC_LOCATION: Cell<Option<String>> = const { Cell::new(None) };
}

/// Run `f`, sending an escaping unwind to the termination handler
///
/// Wrapping `main` (or a thread body) in `guard` marks it as the outermost
/// handler: whatever unwinds out of it ends the process with one report.
pub fn guard<T, F>(f: F) -> T
where
    F: FnOnce() -> T + UnwindSafe,
{
    PANIC_LOCATION.with(|slot| slot.set(None));
    match panic::catch_unwind(f) {
        Ok(value) => value,
        Err(payload) => {
            let mut description = describe_payload(&*payload).to_owned();
            if let Some(location) = PANIC_LOCATION.with(Cell::take) {
                description.push('\n');
                description.push_str(&location);
            }
            on_escaped(&description)
        }
    }
}

#[cfg(unix)]
mod unix {
    use super::{on_escaped, BootstrapError, LOG_TARGET};
    use faultline_common::{call_site, escalate};
    use signal_hook::iterator::{Handle, Signals};
    use std::fmt;
    use std::thread::{self, JoinHandle};

    /// Thread turning delivered signals into escalated diagnostics
    ///
    /// `signal-hook` only records the delivery inside the real handler; the
    /// trace is captured here, on an ordinary thread.
    pub(super) struct SignalThread {
        handle: Handle,
        thread: Option<JoinHandle<()>>,
    }

    impl SignalThread {
        pub(super) fn spawn(signals: &[i32]) -> Result<Self, BootstrapError> {
            let mut iterator = Signals::new(signals).map_err(BootstrapError::SignalRegistration)?;
            let handle = iterator.handle();
            let thread = thread::Builder::new()
                .name("faultline-signals".to_owned())
                .spawn(move || {
                    for signal in iterator.forever() {
                        log::debug!(target: LOG_TARGET, "Escalating signal {signal}");
                        bridge(signal);
                    }
                })
                .map_err(|error| {
                    handle.close();
                    BootstrapError::ThreadSpawn(error)
                })?;
            Ok(Self {
                handle,
                thread: Some(thread),
            })
        }
    }

    /// Nothing on the signal thread can handle the escalation, so it goes
    /// straight to the termination handler without unwinding
    fn bridge(signal: i32) -> ! {
        let error = escalate(signal, call_site!());
        on_escaped(error.describe())
    }

    impl fmt::Debug for SignalThread {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("SignalThread")
                .field("running", &self.thread.is_some())
                .finish_non_exhaustive()
        }
    }

    impl Drop for SignalThread {
        fn drop(&mut self) {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }
}
