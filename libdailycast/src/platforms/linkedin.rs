//! LinkedIn platform implementation
//!
//! Creates a public text share through the UGC posts API. Only `201 Created`
//! counts as success.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::config::LinkedInConfig;
use crate::error::PlatformError;
use crate::platforms::Platform;
use crate::types::PublishTarget;

const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

pub struct LinkedInClient {
    http_client: Client,
    configured: bool,
    access_token: Option<SecretString>,
    person_id: Option<String>,
    base_url: String,
}

impl LinkedInClient {
    pub fn new(config: &LinkedInConfig, http_client: Client) -> Self {
        Self {
            http_client,
            configured: config.is_configured(),
            access_token: config.access_token.clone(),
            person_id: config.person_id.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Request body for a public, media-less text share
pub fn share_envelope(person_id: &str, text: &str) -> Value {
    json!({
        "author": format!("urn:li:person:{}", person_id),
        "lifecycleState": "PUBLISHED",
        "specificContent": {
            "com.linkedin.ugc.ShareContent": {
                "shareCommentary": {
                    "text": text
                },
                "shareMediaCategory": "NONE"
            }
        },
        "visibility": {
            "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"
        }
    })
}

#[async_trait]
impl Platform for LinkedInClient {
    fn target(&self) -> PublishTarget {
        PublishTarget::LinkedIn
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn post(&self, content: &str) -> Result<Option<String>, PlatformError> {
        let (Some(token), Some(person_id)) = (&self.access_token, &self.person_id) else {
            return Err(PlatformError::NotConfigured(self.name().to_string()));
        };

        let response = self
            .http_client
            .post(format!("{}/v2/ugcPosts", self.base_url))
            .bearer_auth(token.expose_secret())
            .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION)
            .json(&share_envelope(person_id, content))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            let detail = format!("{} - {}", status.as_u16(), body);
            return Err(match status {
                StatusCode::UNAUTHORIZED => PlatformError::Authentication(detail),
                _ => PlatformError::Posting(detail),
            });
        }

        let share_urn = response
            .headers()
            .get("x-restli-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(share_urn)
    }
}
