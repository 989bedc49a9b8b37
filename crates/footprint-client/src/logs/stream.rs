//! Server-push log stream controller.
//!
//! A [`StreamController`] owns at most one connection to `/logs/stream` at a
//! time. The connection runs as a spawned task that decodes SSE events and
//! forwards them over a bounded channel; the controller's owner pulls them
//! with [`StreamController::next_event`], which is the only place lines reach
//! the [`AppendBuffer`]. Because of that, [`StreamController::stop`] is
//! synchronous: once it returns, nothing further is appended.
//!
//! There is no automatic reconnect. When the connection drops the controller
//! reports [`StreamEvent::Lost`] and stays `Closed` until `start` is called
//! again.

use reqwest::{Client, Url};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::buffer::AppendBuffer;
use super::sse::{payload_to_line, SseDecoder};
use super::LogLine;

/// The push connection dropped or could not be established.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lost connection to log stream: {reason}")]
pub struct StreamLost {
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Never started.
    Idle,
    /// Connection task spawned; no response yet.
    Connecting,
    /// Handshake succeeded; messages are flowing.
    Open,
    /// Stopped by the owner or lost. `start` reopens.
    Closed,
}

/// What [`StreamController::next_event`] observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// The server accepted the connection.
    Connected,
    /// A line was appended to the buffer at `position`. `notify` is set when
    /// the owner asked to follow new data.
    Appended { position: usize, notify: bool },
    /// The connection is gone; the controller is now `Closed`.
    Lost(StreamLost),
}

/// Messages from the connection task to the controller.
#[derive(Debug)]
enum StreamMessage {
    Opened,
    Line(LogLine),
    Failed(StreamLost),
}

struct StreamSession {
    id: u64,
    task: JoinHandle<()>,
    rx: mpsc::Receiver<StreamMessage>,
}

impl StreamSession {
    /// Aborts the connection task and drops everything still queued.
    fn teardown(self) {
        self.task.abort();
    }
}

pub struct StreamController {
    client: Client,
    url: Url,
    channel_capacity: usize,
    follow: bool,
    state: StreamState,
    session: Option<StreamSession>,
    sessions_started: u64,
}

impl std::fmt::Debug for StreamController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamController")
            .field("url", &self.url.as_str())
            .field("state", &self.state)
            .field("follow", &self.follow)
            .field("session", &self.session.as_ref().map(|s| s.id))
            .finish_non_exhaustive()
    }
}

impl StreamController {
    /// Creates an idle controller for the SSE endpoint at `url`.
    ///
    /// `client` should have no whole-request timeout; the stream is unbounded.
    #[must_use]
    pub fn new(client: Client, url: Url, channel_capacity: usize) -> Self {
        Self {
            client,
            url,
            channel_capacity: channel_capacity.max(1),
            follow: false,
            state: StreamState::Idle,
            session: None,
            sessions_started: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// `true` while connecting or open.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Number of connections opened over the controller's lifetime.
    #[must_use]
    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    /// Sets whether [`StreamEvent::Appended`] carries `notify: true`.
    pub fn set_follow(&mut self, follow: bool) {
        self.follow = follow;
    }

    /// Opens a connection, tearing down any existing one first.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        if let Some(previous) = self.session.take() {
            tracing::debug!(session = previous.id, "restarting log stream");
            previous.teardown();
        }

        self.sessions_started += 1;
        let id = self.sessions_started;
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let task = tokio::spawn(run_connection(self.client.clone(), self.url.clone(), tx));

        self.session = Some(StreamSession { id, task, rx });
        self.state = StreamState::Connecting;
        tracing::info!(session = id, url = %self.url, "log stream connecting");
    }

    /// Closes the connection if there is one. Idempotent.
    ///
    /// Messages received by the task but not yet pulled through
    /// [`next_event`](Self::next_event) are discarded.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(session = session.id, "log stream stopped");
            session.teardown();
            self.state = StreamState::Closed;
        }
    }

    /// Waits for the next stream message and applies it to `buffer`.
    ///
    /// Returns `None` immediately when no connection is active. Cancel-safe:
    /// dropping the future before it resolves loses no message, so it can be
    /// raced in `tokio::select!`.
    pub async fn next_event(&mut self, buffer: &mut AppendBuffer) -> Option<StreamEvent> {
        let message = match self.session.as_mut() {
            Some(session) => session.rx.recv().await,
            None => return None,
        };

        match message {
            Some(StreamMessage::Opened) => {
                self.state = StreamState::Open;
                tracing::info!(url = %self.url, "log stream open");
                Some(StreamEvent::Connected)
            }
            Some(StreamMessage::Line(line)) => {
                self.state = StreamState::Open;
                let position = buffer.append(line);
                Some(StreamEvent::Appended {
                    position,
                    notify: self.follow,
                })
            }
            Some(StreamMessage::Failed(lost)) => Some(self.lose(lost)),
            None => Some(self.lose(StreamLost {
                reason: "stream task ended unexpectedly".to_owned(),
            })),
        }
    }

    fn lose(&mut self, lost: StreamLost) -> StreamEvent {
        tracing::warn!(reason = %lost.reason, "log stream lost");
        if let Some(session) = self.session.take() {
            session.teardown();
        }
        self.state = StreamState::Closed;
        StreamEvent::Lost(lost)
    }
}

impl Drop for StreamController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Connection task body: always ends by reporting why the stream closed,
/// unless the controller has already gone away.
async fn run_connection(client: Client, url: Url, tx: mpsc::Sender<StreamMessage>) {
    let reason = match pump(&client, &url, &tx).await {
        Ok(()) => "server closed the stream".to_owned(),
        Err(reason) => reason,
    };
    // A send error means the controller stopped; nobody is listening.
    let _ = tx.send(StreamMessage::Failed(StreamLost { reason })).await;
}

async fn pump(
    client: &Client,
    url: &Url,
    tx: &mpsc::Sender<StreamMessage>,
) -> Result<(), String> {
    let mut response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .header(reqwest::header::CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|e| format!("connection failed: {e}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("handshake failed with status {}", status.as_u16()));
    }
    if tx.send(StreamMessage::Opened).await.is_err() {
        return Ok(());
    }

    let mut decoder = SseDecoder::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| format!("read failed: {e}"))?
    {
        for payload in decoder.feed(&chunk) {
            let line = payload_to_line(&payload);
            if tx.send(StreamMessage::Line(line)).await.is_err() {
                return Ok(());
            }
        }
    }
    Ok(())
}
