use thiserror::Error;

/// Normalized failure from the request gateway.
///
/// Transport and HTTP-level failures both land here; [`GatewayError::user_message`]
/// gives the text a view shows to the user.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure before a usable response (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response, with the server's `detail` message when it sent one.
    #[error("HTTP {status}: {}", detail.as_deref().unwrap_or("request failed"))]
    Http { status: u16, detail: Option<String> },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Human-readable message suitable for direct display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(e) if e.is_timeout() => "Request timed out".to_owned(),
            Self::Network(e) if e.is_connect() => "Could not connect to the server".to_owned(),
            Self::Network(e) => format!("Network error: {e}"),
            Self::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Http {
                status,
                detail: None,
            } => format!("Request failed with status {status}"),
            Self::Deserialize { context, .. } => format!("Unexpected response from {context}"),
            Self::InvalidUrl(reason) => reason.clone(),
        }
    }

    /// HTTP status for [`GatewayError::Http`] failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Deserialize { .. } | Self::InvalidUrl(_) => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
