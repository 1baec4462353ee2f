//! Twitter (X) platform implementation
//!
//! Posts through the v2 `POST /2/tweets` endpoint with OAuth 1.0a user
//! context. Content longer than 280 characters is truncated before sending.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::TwitterConfig;
use crate::error::PlatformError;
use crate::platforms::oauth1::OAuth1Signer;
use crate::platforms::Platform;
use crate::types::PublishTarget;

pub const TWITTER_CHARACTER_LIMIT: usize = 280;

#[derive(Debug, Serialize)]
struct CreateTweet<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: TweetData,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
}

pub struct TwitterClient {
    http_client: Client,
    configured: bool,
    /// `None` when any of the four credentials is missing
    signer: Option<OAuth1Signer>,
    base_url: String,
}

impl TwitterClient {
    pub fn new(config: &TwitterConfig, http_client: Client) -> Self {
        let signer = match (
            &config.api_key,
            &config.api_secret,
            &config.access_token,
            &config.access_secret,
        ) {
            (Some(key), Some(secret), Some(token), Some(token_secret)) => Some(OAuth1Signer::new(
                key.clone(),
                secret.clone(),
                token.clone(),
                token_secret.clone(),
            )),
            _ => None,
        };

        Self {
            http_client,
            configured: config.is_configured(),
            signer,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn tweets_url(&self) -> String {
        format!("{}/2/tweets", self.base_url)
    }
}

fn map_twitter_status(status: StatusCode, body: String) -> PlatformError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PlatformError::Authentication(format!(
            "Twitter rejected the credentials: {} - {}",
            status.as_u16(),
            body
        )),
        _ => PlatformError::Posting(format!("{} - {}", status.as_u16(), body)),
    }
}

#[async_trait]
impl Platform for TwitterClient {
    fn target(&self) -> PublishTarget {
        PublishTarget::Twitter
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn character_limit(&self) -> Option<usize> {
        Some(TWITTER_CHARACTER_LIMIT)
    }

    async fn post(&self, content: &str) -> Result<Option<String>, PlatformError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| PlatformError::NotConfigured(self.name().to_string()))?;

        let url = self.tweets_url();
        let authorization = signer.authorization_header("POST", &url, &[])?;

        tracing::debug!("Posting to Twitter: {} characters", content.chars().count());

        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&CreateTweet { text: content })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_twitter_status(status, body));
        }

        let created: CreateTweetResponse = response
            .json()
            .await
            .map_err(|e| PlatformError::Posting(format!("Unexpected Twitter response: {}", e)))?;

        Ok(Some(created.data.id))
    }
}
