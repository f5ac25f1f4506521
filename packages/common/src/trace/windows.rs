//! Indexed rendering used on Windows hosts

use super::{fill_frames, TraceCapture, EMPTY, NO_SYMBOLS};
use std::fmt::{self, Write as _};

/// Frames captured regardless of the requested count
///
/// Frames go into a fixed-size stack buffer on this path.
pub const WINDOWS_MAX_FRAMES: usize = 30;

/// Longest symbol name kept per frame, in bytes
pub const WINDOWS_MAX_NAME_LEN: usize = 255;

/// Captures up to [`WINDOWS_MAX_FRAMES`] frames and renders them as
/// `<index>: <name> at 0x<address>`, with the index counting down to `0` at
/// the outermost frame
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsTracer;

impl TraceCapture for WindowsTracer {
    fn capture(&self, _max_frames: usize) -> String {
        let mut buffer = [0usize; WINDOWS_MAX_FRAMES];
        let count = fill_frames(&mut buffer);

        let mut name = String::new();
        if name.try_reserve_exact(WINDOWS_MAX_NAME_LEN + 1).is_err() {
            return NO_SYMBOLS.to_owned();
        }
        if count == 0 {
            return EMPTY.to_owned();
        }

        let mut out = String::new();
        for (i, &ip) in buffer.iter().take(count).enumerate() {
            name.clear();
            let address = lookup(ip, &mut name);
            let shown = if name.is_empty() { "??" } else { name.as_str() };
            // Writing into a String cannot fail
            let _ = writeln!(out, "{}: {shown} at {address:#x}", count - i - 1);
        }
        out
    }
}

/// Resolve `ip` into `name`, returning the symbol's start address
fn lookup(ip: usize, name: &mut String) -> usize {
    let mut address = ip;
    let mut found = false;
    backtrace::resolve(ip as *mut std::ffi::c_void, |symbol| {
        if found {
            return;
        }
        if let Some(symbol_name) = symbol.name() {
            found = true;
            push_symbol_name(&mut *name, symbol_name);
            if let Some(addr) = symbol.addr() {
                address = addr as usize;
            }
        }
    });
    address
}

/// Append `symbol` to `name`, stopping at [`WINDOWS_MAX_NAME_LEN`] bytes on
/// a char boundary
#[doc(hidden)]
pub fn push_symbol_name(name: &mut String, symbol: impl fmt::Display) {
    // BoundedName never reports an error
    let _ = write!(BoundedName { buf: name }, "{symbol}");
}

/// Writer that silently stops at [`WINDOWS_MAX_NAME_LEN`] bytes
struct BoundedName<'a> {
    buf: &'a mut String,
}

impl fmt::Write for BoundedName<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.buf.len() + ch.len_utf8() > WINDOWS_MAX_NAME_LEN {
                break;
            }
            self.buf.push(ch);
        }
        Ok(())
    }
}
