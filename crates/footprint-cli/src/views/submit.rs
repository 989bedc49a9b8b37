use footprint_client::FootprintClient;
use footprint_core::CrawlRequest;

use super::ViewError;

/// Submission form: validates input and starts a crawl.
pub(crate) struct SubmitView<'a> {
    client: &'a FootprintClient,
}

impl<'a> SubmitView<'a> {
    pub(crate) fn new(client: &'a FootprintClient) -> Self {
        Self { client }
    }

    /// Starts collection for `user_id` and returns the confirmation message.
    ///
    /// Empty platform or engine selections fall back to the defaults.
    pub(crate) async fn submit(
        &self,
        user_id: &str,
        platforms: Vec<String>,
        search_engines: Vec<String>,
    ) -> Result<String, ViewError> {
        let request = CrawlRequest::new(user_id, platforms, search_engines);
        if request.user_id.is_empty() {
            return Err(ViewError::InvalidInput("Please enter a user ID".to_owned()));
        }

        self.client.crawl(&request).await?;
        tracing::info!(
            user_id = %request.user_id,
            platforms = ?request.platforms,
            search_engines = ?request.search_engines,
            "crawl requested"
        );
        Ok(format!(
            "Analysis started for {}. This may take a few minutes.",
            request.user_id
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn blank_user_id_is_rejected_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/crawl"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = FootprintClient::with_base_url(&server.uri(), 30).unwrap();
        let err = SubmitView::new(&client)
            .submit("   ", Vec::new(), Vec::new())
            .await
            .expect_err("blank id should fail");

        assert!(matches!(err, ViewError::InvalidInput(_)));
        assert_eq!(err.user_message(), "Please enter a user ID");
    }

    #[tokio::test]
    async fn submit_sends_trimmed_id_and_selection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/crawl"))
            .and(body_json(json!({
                "user_id": "octocat",
                "platforms": ["github"],
                "search_engines": ["google", "bing"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user_id": "octocat" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = FootprintClient::with_base_url(&server.uri(), 30).unwrap();
        let message = SubmitView::new(&client)
            .submit(" octocat ", vec!["github".to_owned()], Vec::new())
            .await
            .unwrap();

        assert_eq!(
            message,
            "Analysis started for octocat. This may take a few minutes."
        );
    }
}
