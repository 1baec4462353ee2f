//! Platform abstraction and implementations
//!
//! Every destination implements [`Platform`]. The provided
//! [`Platform::publish`] method wraps the platform-specific
//! [`Platform::post`] with the shared contract: unconfigured platforms are
//! skipped without touching the network, length limits are applied, and any
//! error is logged and folded into a [`PublishResult`] instead of being
//! propagated.
//!
//! # Examples
//!
//! ```no_run
//! use libdailycast::config::Config;
//! use libdailycast::platforms::{linkedin::LinkedInClient, Platform};
//!
//! # async fn example() -> libdailycast::Result<()> {
//! let config = Config::load()?;
//! let platform = LinkedInClient::new(&config.linkedin, config.http_client());
//!
//! let result = platform.publish("Hello from Dailycast").await;
//! if result.succeeded() {
//!     println!("Posted to {}", platform.name());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::types::{PublishResult, PublishTarget};

pub mod facebook;
pub mod linkedin;
pub mod oauth1;
pub mod twitter;

// Available in all builds so integration tests can use it
pub mod mock;

/// Marker appended to truncated content
pub const ELLIPSIS: &str = "...";

#[async_trait]
pub trait Platform: Send + Sync {
    /// Destination this client posts to
    fn target(&self) -> PublishTarget;

    /// Platform name for log lines
    fn name(&self) -> &str {
        self.target().display_name()
    }

    /// Whether all credentials needed to post are present.
    ///
    /// Evaluated from the configuration the client was built with; never
    /// makes a network call.
    fn is_configured(&self) -> bool;

    /// How to obtain missing credentials, logged when the platform is skipped
    fn setup_hint(&self) -> Option<&'static str> {
        None
    }

    /// Maximum post length in characters, if the platform enforces one
    fn character_limit(&self) -> Option<usize> {
        None
    }

    /// Apply the platform's length limit to `content`
    fn prepare_content(&self, content: &str) -> String {
        match self.character_limit() {
            Some(limit) => truncate_to_limit(content, limit),
            None => content.to_string(),
        }
    }

    /// Send `content` as-is and return the remote post id, if the platform
    /// reports one.
    ///
    /// # Errors
    ///
    /// Returns a `PlatformError` for transport failures and for any response
    /// the platform does not treat as success.
    async fn post(&self, content: &str) -> Result<Option<String>, PlatformError>;

    /// Publish `text`, never failing.
    async fn publish(&self, text: &str) -> PublishResult {
        let target = self.target();

        if !self.is_configured() {
            let error = PlatformError::NotConfigured(self.name().to_string());
            tracing::warn!("{}. Skipping {} post.", error, self.name());
            if let Some(hint) = self.setup_hint() {
                tracing::info!("{}", hint);
            }
            return PublishResult::skipped(target, error.to_string());
        }

        let content = self.prepare_content(text);
        if content.len() != text.len() {
            tracing::info!(
                "Truncated content to {} characters for {}",
                content.chars().count(),
                self.name()
            );
        }

        tracing::info!("Posting to {}...", self.name());
        match self.post(&content).await {
            Ok(remote_id) => {
                match &remote_id {
                    Some(id) => tracing::info!("Successfully posted to {}! Post ID: {}", self.name(), id),
                    None => tracing::info!("Successfully posted to {}!", self.name()),
                }
                PublishResult::posted(target, remote_id)
            }
            Err(e) => {
                tracing::error!("Error posting to {}: {}", self.name(), e);
                PublishResult::failed(target, e.to_string())
            }
        }
    }
}

/// Cut `text` to at most `limit` characters.
///
/// Text over the limit keeps its first `limit - 3` characters followed by
/// [`ELLIPSIS`]. Counts Unicode scalar values, not bytes.
pub fn truncate_to_limit(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
