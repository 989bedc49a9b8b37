//! Live log synchronization.
//!
//! Polled snapshots (`/logs/recent`) and the push stream (`/logs/stream`) are
//! both producers into one [`AppendBuffer`]: a snapshot replaces the buffer,
//! each streamed message appends to it.

mod buffer;
mod sse;
mod stream;

pub use buffer::AppendBuffer;
pub use sse::{payload_to_line, SseDecoder};
pub use stream::{StreamController, StreamEvent, StreamLost, StreamState};

/// One log line. Its position in an [`AppendBuffer`] is its arrival index.
pub type LogLine = String;
