//! Request gateway for the footprint backend.
//!
//! Wraps `reqwest` with uniform request logging, a fixed whole-request
//! timeout, and error normalization: every failure, whether transport or
//! HTTP status, comes back as a [`GatewayError`]. There is no retry at this
//! layer; callers decide whether to try again.

use std::time::Duration;

use footprint_core::AppConfig;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::GatewayError;
use crate::logs::StreamController;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "footprint/0.1 (timeline-client)";

/// Client for the footprint backend.
///
/// Holds two `reqwest` clients: one with the request timeout for ordinary
/// calls, and one with only a connect timeout for the unbounded log stream.
/// Use [`FootprintClient::new`] with loaded configuration, or
/// [`FootprintClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct FootprintClient {
    client: Client,
    stream_client: Client,
    base_url: Url,
}

impl FootprintClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if a `reqwest::Client` cannot be
    /// constructed, or [`GatewayError::InvalidUrl`] if the base URL does not
    /// parse.
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        Self::build(
            &config.api_base_url,
            config.request_timeout_secs,
            config.connect_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if a `reqwest::Client` cannot be
    /// constructed, or [`GatewayError::InvalidUrl`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, GatewayError> {
        Self::build(
            base_url,
            timeout_secs,
            DEFAULT_CONNECT_TIMEOUT_SECS,
            DEFAULT_USER_AGENT,
        )
    }

    fn build(
        base_url: &str,
        timeout_secs: u64,
        connect_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent)
            .build()?;
        let stream_client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so that path segments are appended to,
        // rather than replacing, the last segment of the base.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| GatewayError::InvalidUrl(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            client,
            stream_client,
            base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Creates a stream controller for `GET /logs/stream`.
    ///
    /// `channel_capacity` bounds how many messages may wait for the consumer.
    #[must_use]
    pub fn log_stream(&self, channel_capacity: usize) -> StreamController {
        let url = self.endpoint_url(&["logs", "stream"], &[]);
        StreamController::new(self.stream_client.clone(), url, channel_capacity)
    }

    /// Sends one request and returns the JSON body.
    ///
    /// `segments` are appended to the base URL as individually percent-encoded
    /// path segments, so user-supplied ids cannot alter the path structure.
    /// An empty response body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Network`] on transport failure or timeout.
    /// - [`GatewayError::Http`] on a non-2xx status, carrying the server's
    ///   `detail` field when present.
    /// - [`GatewayError::Deserialize`] if a non-empty body is not JSON.
    pub async fn request<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, GatewayError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(segments, query);
        let path = url.path().to_owned();
        tracing::debug!(method = %method, path = %path, "making request");

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(method = %method, path = %path, error = %e, "request failed");
                return Err(GatewayError::Network(e));
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = extract_detail(&text);
            tracing::error!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or(""),
                "API error"
            );
            return Err(GatewayError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| GatewayError::Deserialize {
            context: format!("{method} {path}"),
            source: e,
        })
    }

    /// [`request`](Self::request) followed by decoding into `T`.
    ///
    /// # Errors
    ///
    /// As [`request`](Self::request), plus [`GatewayError::Deserialize`] when
    /// the body does not match `T`.
    pub async fn request_as<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let context = format!("{method} /{}", segments.join("/"));
        let value = self.request(method, segments, body, query).await?;
        serde_json::from_value(value)
            .map_err(|e| GatewayError::Deserialize { context, source: e })
    }

    /// Builds the full request URL from path segments and query pairs.
    pub(crate) fn endpoint_url(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }
}

/// Pulls the server-provided error message out of a failure body.
///
/// The backend reports errors as `{"detail": ...}`; a string detail is used
/// verbatim and any other JSON detail (validation error lists) is rendered
/// compactly.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
