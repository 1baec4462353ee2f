//! One-time credential lookups
//!
//! Helpers behind `daily-creds`: listing the Facebook Pages a user token can
//! manage (with their page tokens), exchanging a short-lived Facebook user
//! token for a long-lived one, and resolving the LinkedIn member id that the
//! share API expects as author.

use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::PlatformError;
use crate::platforms::facebook::GRAPH_API_VERSION;

/// Permissions a user token needs before it can list and post to pages
pub const REQUIRED_PAGE_PERMISSIONS: [&str; 3] =
    ["pages_show_list", "pages_read_engagement", "pages_manage_posts"];

/// A page returned by `/me/accounts`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageAccount {
    pub id: String,
    pub name: String,
    pub access_token: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageList {
    #[serde(default)]
    data: Vec<PageAccount>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LongLivedToken {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

/// Subset of the OpenID `userinfo` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserInfo {
    /// Member id to use as `LINKEDIN_PERSON_ID`
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Shorten a token for display
pub fn redact(token: &str, visible: usize) -> String {
    if token.chars().count() <= visible {
        return token.to_string();
    }
    let shown: String = token.chars().take(visible).collect();
    format!("{}...", shown)
}

/// Decode a Graph API response, surfacing `{"error": {"message": ...}}`
/// bodies as authentication failures.
async fn graph_json<T: DeserializeOwned>(response: Response) -> Result<T, PlatformError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| PlatformError::Network(e.to_string()))?;

    let body: Value = match serde_json::from_str(&text) {
        Ok(body) => body,
        Err(_) if !status.is_success() => {
            return Err(PlatformError::Posting(format!("{} - {}", status.as_u16(), text)));
        }
        Err(e) => {
            return Err(PlatformError::Posting(format!(
                "Unexpected Graph API response: {}",
                e
            )));
        }
    };

    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(PlatformError::Authentication(message.to_string()));
    }

    if !status.is_success() {
        return Err(PlatformError::Posting(format!("{} - {}", status.as_u16(), body)));
    }

    serde_json::from_value(body)
        .map_err(|e| PlatformError::Posting(format!("Unexpected Graph API response: {}", e)))
}

pub struct GraphClient {
    http_client: Client,
    base_url: String,
}

impl GraphClient {
    pub fn new(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, GRAPH_API_VERSION, path)
    }

    /// Pages managed by the owner of `user_token`, each with its page token
    pub async fn list_pages(&self, user_token: &SecretString) -> Result<Vec<PageAccount>, PlatformError> {
        let response = self
            .http_client
            .get(self.url("me/accounts"))
            .query(&[("access_token", user_token.expose_secret())])
            .send()
            .await?;

        let pages: PageList = graph_json(response).await?;
        tracing::debug!("Graph API returned {} page(s)", pages.data.len());
        Ok(pages.data)
    }

    /// Trade a short-lived user token for a long-lived (about 60 days) one
    pub async fn exchange_long_lived_token(
        &self,
        app_id: &str,
        app_secret: &SecretString,
        short_lived_token: &SecretString,
    ) -> Result<LongLivedToken, PlatformError> {
        let response = self
            .http_client
            .get(self.url("oauth/access_token"))
            .query(&[
                ("grant_type", "fb_exchange_token"),
                ("client_id", app_id),
                ("client_secret", app_secret.expose_secret()),
                ("fb_exchange_token", short_lived_token.expose_secret()),
            ])
            .send()
            .await?;

        graph_json(response).await
    }
}

pub struct LinkedInIdentity {
    http_client: Client,
    base_url: String,
}

impl LinkedInIdentity {
    pub fn new(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the member behind `access_token`
    pub async fn user_info(&self, access_token: &SecretString) -> Result<UserInfo, PlatformError> {
        let response = self
            .http_client
            .get(format!("{}/v2/userinfo", self.base_url))
            .bearer_auth(access_token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::Authentication(format!(
                "{} - {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PlatformError::Posting(format!("Unexpected LinkedIn response: {}", e)))
    }
}
