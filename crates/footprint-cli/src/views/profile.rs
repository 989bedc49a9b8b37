use footprint_client::FootprintClient;

use super::ViewError;

const PROFILE_NOT_FOUND: &str = "Profile not found. You may need to generate it first.";

/// Holds the opaque profile payload for one user.
pub(crate) struct ProfileView<'a> {
    client: &'a FootprintClient,
    user_id: String,
    profile: Option<serde_json::Value>,
    error: Option<String>,
}

impl<'a> ProfileView<'a> {
    pub(crate) fn new(client: &'a FootprintClient, user_id: &str) -> Self {
        Self {
            client,
            user_id: user_id.to_owned(),
            profile: None,
            error: None,
        }
    }

    pub(crate) fn profile(&self) -> Option<&serde_json::Value> {
        self.profile.as_ref()
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) async fn load(&mut self) -> Result<(), ViewError> {
        match self.client.profile(&self.user_id).await {
            Ok(profile) => {
                self.profile = Some(profile);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(if e.is_not_found() {
                    PROFILE_NOT_FOUND.to_owned()
                } else {
                    e.user_message()
                });
                Err(e.into())
            }
        }
    }

    pub(crate) async fn generate(&mut self) -> Result<(), ViewError> {
        match self.client.generate_profile(&self.user_id).await {
            Ok(profile) => {
                tracing::info!(user_id = %self.user_id, "profile generated");
                self.profile = Some(profile);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn missing_profile_suggests_generation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/profile"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "detail": "Profile not found" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/users/octocat/profile/generate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "user_id": "octocat" })),
            )
            .mount(&server)
            .await;

        let client = FootprintClient::with_base_url(&server.uri(), 30).unwrap();
        let mut view = ProfileView::new(&client, "octocat");

        assert!(view.load().await.is_err());
        assert_eq!(view.error(), Some(PROFILE_NOT_FOUND));
        assert!(view.profile().is_none());

        view.generate().await.unwrap();
        assert!(view.error().is_none());
        assert_eq!(view.profile().unwrap()["user_id"], "octocat");
    }

    #[tokio::test]
    async fn failed_generation_keeps_loaded_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "v": 1 })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/users/octocat/profile/generate"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "detail": "LLM unavailable" })),
            )
            .mount(&server)
            .await;

        let client = FootprintClient::with_base_url(&server.uri(), 30).unwrap();
        let mut view = ProfileView::new(&client, "octocat");
        view.load().await.unwrap();

        assert!(view.generate().await.is_err());
        assert_eq!(view.error(), Some("LLM unavailable"));
        assert_eq!(view.profile().unwrap()["v"], 1);
    }
}
