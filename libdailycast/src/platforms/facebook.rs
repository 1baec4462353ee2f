//! Facebook Page feed implementation
//!
//! Publishes to `/{page-id}/feed` on the Graph API with a page access
//! token. Only `200 OK` counts as success; the post id comes from the body.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::FacebookConfig;
use crate::error::PlatformError;
use crate::platforms::Platform;
use crate::types::PublishTarget;

pub const GRAPH_API_VERSION: &str = "v18.0";

#[derive(Debug, Deserialize)]
struct FeedResponse {
    id: Option<String>,
}

pub struct FacebookClient {
    http_client: Client,
    configured: bool,
    access_token: Option<SecretString>,
    page_id: Option<String>,
    base_url: String,
}

impl FacebookClient {
    pub fn new(config: &FacebookConfig, http_client: Client) -> Self {
        Self {
            http_client,
            configured: config.is_configured(),
            access_token: config.access_token.clone(),
            page_id: config.page_id.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn feed_url(&self, page_id: &str) -> String {
        format!("{}/{}/{}/feed", self.base_url, GRAPH_API_VERSION, page_id)
    }
}

#[async_trait]
impl Platform for FacebookClient {
    fn target(&self) -> PublishTarget {
        PublishTarget::Facebook
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn setup_hint(&self) -> Option<&'static str> {
        Some(
            "To configure Facebook, create an app at https://developers.facebook.com/, \
             generate a Page access token and set FACEBOOK_ACCESS_TOKEN and FACEBOOK_PAGE_ID",
        )
    }

    async fn post(&self, content: &str) -> Result<Option<String>, PlatformError> {
        let (Some(token), Some(page_id)) = (&self.access_token, &self.page_id) else {
            return Err(PlatformError::NotConfigured(self.name().to_string()));
        };

        let response = self
            .http_client
            .post(self.feed_url(page_id))
            .form(&[("message", content), ("access_token", token.expose_secret())])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            let detail = format!("{} - {}", status.as_u16(), body);
            return Err(match status {
                StatusCode::UNAUTHORIZED => PlatformError::Authentication(detail),
                _ => PlatformError::Posting(detail),
            });
        }

        let created: FeedResponse = response
            .json()
            .await
            .map_err(|e| PlatformError::Posting(format!("Unexpected Facebook response: {}", e)))?;

        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FileConfig};

    fn configured() -> FacebookClient {
        let config = Config::resolve(FileConfig::default(), |key| match key {
            "FACEBOOK_ACCESS_TOKEN" => Some("page-token".to_string()),
            "FACEBOOK_PAGE_ID" => Some("905589205979351".to_string()),
            _ => None,
        });
        FacebookClient::new(&config.facebook, Client::new())
    }

    #[test]
    fn test_feed_url() {
        let client = configured();
        assert_eq!(
            client.feed_url("905589205979351"),
            "https://graph.facebook.com/v18.0/905589205979351/feed"
        );
    }

    #[test]
    fn test_is_configured() {
        assert!(configured().is_configured());

        let config = Config::resolve(FileConfig::default(), |_| None);
        assert!(!FacebookClient::new(&config.facebook, Client::new()).is_configured());
    }

    #[test]
    fn test_client_agrees_with_config_predicate() {
        let cases = [
            (None, None),
            (Some("t"), None),
            (None, Some("1")),
            (Some("t"), Some("1")),
        ];
        for (token, page) in cases {
            let config = Config::resolve(FileConfig::default(), |key| match key {
                "FACEBOOK_ACCESS_TOKEN" => token.map(str::to_string),
                "FACEBOOK_PAGE_ID" => page.map(str::to_string),
                _ => None,
            });
            let client = FacebookClient::new(&config.facebook, Client::new());
            assert_eq!(client.is_configured(), config.facebook.is_configured());
        }
    }

    #[test]
    fn test_setup_hint_names_required_variables() {
        let hint = configured().setup_hint().unwrap();
        assert!(hint.contains("FACEBOOK_ACCESS_TOKEN"));
        assert!(hint.contains("FACEBOOK_PAGE_ID"));
    }

    #[test]
    fn test_feed_response_without_id() {
        let parsed: FeedResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.id.is_none());
    }
}
