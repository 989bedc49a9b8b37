//! Incremental `text/event-stream` decoding.
//!
//! Only the `data` field matters here: each event's data lines are joined with
//! `\n` and emitted when a blank line ends the event. Comments (`:` lines) and
//! other fields are ignored. Lines end in `\n`, `\r\n` or a lone `\r`, and an
//! event whose data is empty is dropped.

use super::LogLine;

/// Turns arbitrary body chunks into complete event payloads.
///
/// Chunk boundaries may fall anywhere, including inside a multi-byte UTF-8
/// sequence; partial lines are held until their terminator arrives.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    data: Vec<String>,
    /// The last line ended in `\r`; a leading `\n` completes that terminator.
    after_cr: bool,
}

impl SseDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns the payloads of all events it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut events = Vec::new();
        loop {
            if self.after_cr && !self.pending.is_empty() {
                if self.pending[0] == b'\n' {
                    self.pending.remove(0);
                }
                self.after_cr = false;
            }
            let Some(pos) = self
                .pending
                .iter()
                .position(|&b| b == b'\n' || b == b'\r')
            else {
                break;
            };
            let mut raw: Vec<u8> = self.pending.drain(..=pos).collect();
            self.after_cr = raw.pop() == Some(b'\r');
            let line = String::from_utf8_lossy(&raw);
            if let Some(payload) = self.process_line(&line) {
                events.push(payload);
            }
        }
        events
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_owned());
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        let payload = std::mem::take(&mut self.data).join("\n");
        (!payload.is_empty()).then_some(payload)
    }
}

/// Extracts the log line from an event payload.
///
/// The backend wraps lines as `{"log": "...", "type": "history" | "live" | "error"}`;
/// the `log` field is the line. Any other payload is taken verbatim.
#[must_use]
pub fn payload_to_line(payload: &str) -> LogLine {
    serde_json::from_str::<serde_json::Value>(payload)
        .ok()
        .and_then(|value| {
            value
                .get("log")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| payload.to_owned())
}
