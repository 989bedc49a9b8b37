//! Typed wrappers for the backend endpoints.

use footprint_core::{ActivityRecord, CrawlRequest, TimelineBucket, UserStats};
use reqwest::Method;

use crate::client::FootprintClient;
use crate::error::GatewayError;
use crate::logs::LogLine;
use crate::types::{RecentLogsPayload, TimelinePayload};

/// No request body.
const NO_BODY: Option<&()> = None;

impl FootprintClient {
    /// `POST /crawl`: asks the backend to start collecting data for a user.
    ///
    /// The acknowledgement is returned untouched; collection itself runs in
    /// the background on the server.
    ///
    /// # Errors
    ///
    /// Any [`GatewayError`]; a rejected user id comes back as
    /// [`GatewayError::Http`] with the server's detail.
    pub async fn crawl(&self, request: &CrawlRequest) -> Result<serde_json::Value, GatewayError> {
        self.request(Method::POST, &["crawl"], Some(request), &[])
            .await
    }

    /// `GET /users/{id}/activities`, optionally restricted to one platform.
    ///
    /// # Errors
    ///
    /// Any [`GatewayError`].
    pub async fn activities(
        &self,
        user_id: &str,
        platform: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ActivityRecord>, GatewayError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(p) = platform {
            query.push(("platform", p.to_owned()));
        }
        self.request_as(
            Method::GET,
            &["users", user_id, "activities"],
            NO_BODY,
            &query,
        )
        .await
    }

    /// `GET /users/{id}/timeline`: buckets pre-grouped by the server, in the
    /// server's order.
    ///
    /// # Errors
    ///
    /// Any [`GatewayError`].
    pub async fn timeline(&self, user_id: &str) -> Result<Vec<TimelineBucket>, GatewayError> {
        let payload: TimelinePayload = self
            .request_as(Method::GET, &["users", user_id, "timeline"], NO_BODY, &[])
            .await?;
        Ok(payload.into_buckets())
    }

    /// `GET /users/{id}/stats`.
    ///
    /// # Errors
    ///
    /// Any [`GatewayError`].
    pub async fn stats(&self, user_id: &str) -> Result<UserStats, GatewayError> {
        self.request_as(Method::GET, &["users", user_id, "stats"], NO_BODY, &[])
            .await
    }

    /// `GET /users/{id}/profile`. The payload is passed through unmodified.
    ///
    /// # Errors
    ///
    /// Any [`GatewayError`]; a user without a profile yields a 404
    /// [`GatewayError::Http`].
    pub async fn profile(&self, user_id: &str) -> Result<serde_json::Value, GatewayError> {
        self.request(Method::GET, &["users", user_id, "profile"], NO_BODY, &[])
            .await
    }

    /// `POST /users/{id}/profile/generate`. The payload is passed through
    /// unmodified.
    ///
    /// # Errors
    ///
    /// Any [`GatewayError`].
    pub async fn generate_profile(
        &self,
        user_id: &str,
    ) -> Result<serde_json::Value, GatewayError> {
        self.request(
            Method::POST,
            &["users", user_id, "profile", "generate"],
            NO_BODY,
            &[],
        )
        .await
    }

    /// `GET /logs/recent?lines=N`: the most recent `lines` log lines, oldest
    /// first.
    ///
    /// # Errors
    ///
    /// Any [`GatewayError`].
    pub async fn recent_logs(&self, lines: u32) -> Result<Vec<LogLine>, GatewayError> {
        let payload: RecentLogsPayload = self
            .request_as(
                Method::GET,
                &["logs", "recent"],
                NO_BODY,
                &[("lines", lines.to_string())],
            )
            .await?;
        Ok(payload.into_lines())
    }

    /// `GET /health`, passed through.
    ///
    /// # Errors
    ///
    /// Any [`GatewayError`].
    pub async fn health(&self) -> Result<serde_json::Value, GatewayError> {
        self.request(Method::GET, &["health"], NO_BODY, &[]).await
    }
}
