use footprint_client::{AppendBuffer, FootprintClient, StreamController, StreamEvent};

use super::ViewError;

const STREAM_LOST_MESSAGE: &str = "Lost connection to log stream";

/// Log viewer: a polled snapshot plus optional live tail, both feeding one
/// [`AppendBuffer`].
///
/// Live mode is user-driven. Losing the stream turns it off and it stays off
/// until [`LogsView::start_live`] is called again.
pub(crate) struct LogsView {
    client: FootprintClient,
    recent_lines: u32,
    buffer: AppendBuffer,
    stream: StreamController,
    live: bool,
    error: Option<String>,
}

impl LogsView {
    pub(crate) fn new(client: FootprintClient, recent_lines: u32, channel_capacity: usize) -> Self {
        let stream = client.log_stream(channel_capacity);
        Self {
            client,
            recent_lines,
            buffer: AppendBuffer::new(),
            stream,
            live: false,
            error: None,
        }
    }

    pub(crate) fn buffer(&self) -> &AppendBuffer {
        &self.buffer
    }

    pub(crate) fn is_live(&self) -> bool {
        self.live
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the buffer with the most recent lines from the server.
    ///
    /// Used for the initial load and for manual refresh. Stream messages that
    /// arrive meanwhile stay queued and land after the snapshot on the next
    /// [`pump`](Self::pump). On failure the buffer is left as it was.
    pub(crate) async fn refresh(&mut self) -> Result<(), ViewError> {
        match self.client.recent_logs(self.recent_lines).await {
            Ok(lines) => {
                tracing::debug!(lines = lines.len(), "loaded recent logs");
                self.buffer.replace(lines);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    pub(crate) fn start_live(&mut self) {
        self.live = true;
        self.error = None;
        self.stream.set_follow(true);
        self.stream.start();
    }

    pub(crate) fn stop_live(&mut self) {
        self.live = false;
        self.stream.stop();
    }

    pub(crate) fn toggle_live(&mut self) {
        if self.live {
            self.stop_live();
        } else {
            self.start_live();
        }
    }

    /// Waits for the next stream event and applies it. `None` when not live.
    pub(crate) async fn pump(&mut self) -> Option<StreamEvent> {
        let event = self.stream.next_event(&mut self.buffer).await?;
        if let StreamEvent::Lost(lost) = &event {
            tracing::warn!(reason = %lost.reason, "live logs disabled");
            self.live = false;
            self.error = Some(STREAM_LOST_MESSAGE.to_owned());
        }
        Some(event)
    }
}

impl Drop for LogsView {
    fn drop(&mut self) {
        self.stream.stop();
    }
}
