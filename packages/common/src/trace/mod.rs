//! Best-effort native stack trace capture
//!
//! Capture is used while something else is already failing, so it never
//! panics and never returns an error. Every failure is reported in-band as
//! one of the marker strings below; callers treat the result as opaque text.
//!
//! One [`TraceCapture`] strategy exists per rendering style. All of them are
//! compiled everywhere; [`PlatformTracer`] picks the one matching the host.

mod unix;
mod unsupported;
mod windows;

pub use unix::UnixTracer;
pub use unsupported::UnsupportedTracer;
pub use windows::{push_symbol_name, WindowsTracer, WINDOWS_MAX_FRAMES, WINDOWS_MAX_NAME_LEN};

use std::panic::{self, AssertUnwindSafe};

/// Frame count used when the caller has no preference
pub const DEFAULT_MAX_FRAMES: usize = 30;

/// Symbols could not be resolved, or capture itself failed
pub const NO_SYMBOLS: &str = "[backtrace error] no symbols could be retrieved";

/// Capture succeeded but produced no frames
pub const EMPTY: &str = "[backtrace is empty]";

/// The host has no stack walking support
pub const UNSUPPORTED: &str =
    "[backtrace error] backtrace not implemented for your operating system";

/// Produce a trace string given a frame-count hint
pub trait TraceCapture {
    /// Render up to `max_frames` frames of the caller's stack
    fn capture(&self, max_frames: usize) -> String;
}

/// Capture strategy for the build target
#[cfg(unix)]
pub type PlatformTracer = UnixTracer;

/// Capture strategy for the build target
#[cfg(windows)]
pub type PlatformTracer = WindowsTracer;

/// Capture strategy for the build target
#[cfg(not(any(unix, windows)))]
pub type PlatformTracer = UnsupportedTracer;

/// Render up to `max_frames` frames of the current stack, most recent first
#[must_use]
pub fn capture_trace(max_frames: usize) -> String {
    capture_with(&PlatformTracer::default(), max_frames)
}

/// Run `tracer`, degrading an unwind inside it to [`NO_SYMBOLS`]
#[must_use]
pub fn capture_with<C: TraceCapture + ?Sized>(tracer: &C, max_frames: usize) -> String {
    panic::catch_unwind(AssertUnwindSafe(|| tracer.capture(max_frames)))
        .unwrap_or_else(|_| NO_SYMBOLS.to_owned())
}

/// Fill `buffer` with instruction pointers, innermost frame first
///
/// Returns how many slots were written.
pub(crate) fn fill_frames(buffer: &mut [usize]) -> usize {
    let mut count = 0;
    let len = buffer.len();
    if len == 0 {
        return count;
    }
    backtrace::trace(|frame| match buffer.get_mut(count) {
        Some(slot) => {
            *slot = frame.ip() as usize;
            count += 1;
            count < len
        }
        None => false,
    });
    count
}

/// Join frame lines, each newline-terminated
pub(crate) fn render_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}
