//! Symbol-per-line rendering used on Unix-like hosts

use super::{fill_frames, render_lines, TraceCapture, EMPTY, NO_SYMBOLS};

/// Captures up to the requested number of frames and renders one resolved
/// symbol per line
///
/// Lines look like `module::function [0x55d0c0de1234] at src/main.rs:12`.
/// Frames without a symbol render as `?? [0x...]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixTracer;

impl TraceCapture for UnixTracer {
    fn capture(&self, max_frames: usize) -> String {
        let mut frames: Vec<usize> = Vec::new();
        if frames.try_reserve_exact(max_frames).is_err() {
            return NO_SYMBOLS.to_owned();
        }
        frames.resize(max_frames, 0);
        let count = fill_frames(&mut frames);
        frames.truncate(count);

        if frames.is_empty() {
            return EMPTY.to_owned();
        }
        match symbolize(&frames) {
            Some(lines) => render_lines(lines),
            None => NO_SYMBOLS.to_owned(),
        }
    }
}

/// Resolve every frame, or `None` when nothing resolved at all
#[cfg(feature = "full-backtrace")]
fn symbolize(frames: &[usize]) -> Option<Vec<String>> {
    let mut lines = Vec::new();
    lines.try_reserve_exact(frames.len()).ok()?;

    let mut resolved_any = false;
    for &ip in frames {
        let mut line = None;
        backtrace::resolve(ip as *mut std::ffi::c_void, |symbol| {
            if line.is_some() {
                return;
            }
            if let Some(name) = symbol.name() {
                line = Some(match (symbol.filename(), symbol.lineno()) {
                    (Some(file), Some(lineno)) => {
                        format!("{name} [{ip:#x}] at {}:{lineno}", file.display())
                    }
                    _ => format!("{name} [{ip:#x}]"),
                });
            }
        });
        resolved_any |= line.is_some();
        lines.push(line.unwrap_or_else(|| format!("?? [{ip:#x}]")));
    }
    resolved_any.then_some(lines)
}

#[cfg(not(feature = "full-backtrace"))]
fn symbolize(_frames: &[usize]) -> Option<Vec<String>> {
    None
}
