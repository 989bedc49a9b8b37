//! HTTP and server-push client for the footprint backend.
//!
//! [`FootprintClient`] is the request gateway: one `reqwest` client, uniform
//! logging, and a single normalized [`GatewayError`]. The [`logs`] module holds
//! the append-only line buffer and the live log stream controller.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod logs;
mod types;

pub use client::FootprintClient;
pub use error::GatewayError;
pub use logs::{AppendBuffer, LogLine, StreamController, StreamEvent, StreamLost, StreamState};
