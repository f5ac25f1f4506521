use super::{TraceCapture, UNSUPPORTED};

/// Placeholder for hosts without stack walking
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedTracer;

impl TraceCapture for UnsupportedTracer {
    fn capture(&self, _max_frames: usize) -> String {
        UNSUPPORTED.to_owned()
    }
}
