//! Mock platform implementation for testing
//!
//! A configurable platform that records what it was asked to post. It lets
//! the runner be tested without credentials or network access.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::platforms::Platform;
use crate::types::PublishTarget;

/// Configuration for mock platform behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub target: PublishTarget,

    /// Whether the platform is configured
    pub is_configured: bool,

    /// Error to return from `post`; `None` means success
    pub post_error: Option<PlatformError>,

    /// Remote id returned on success
    pub remote_id: Option<String>,

    /// Character limit applied by `prepare_content`
    pub character_limit: Option<usize>,

    /// Content received by `post`, shared with clones
    pub posted_content: Arc<Mutex<Vec<String>>>,
}

impl MockConfig {
    pub fn new(target: PublishTarget) -> Self {
        Self {
            target,
            is_configured: true,
            post_error: None,
            remote_id: Some(format!("mock-{}", target)),
            character_limit: None,
            posted_content: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock platform for testing
#[derive(Debug, Clone)]
pub struct MockPlatform {
    config: MockConfig,
}

impl MockPlatform {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// A platform that always succeeds
    pub fn success(target: PublishTarget) -> Self {
        Self::new(MockConfig::new(target))
    }

    /// A platform whose posts fail with `error`
    pub fn post_failure(target: PublishTarget, error: PlatformError) -> Self {
        Self::new(MockConfig {
            post_error: Some(error),
            ..MockConfig::new(target)
        })
    }

    /// A platform missing its credentials
    pub fn not_configured(target: PublishTarget) -> Self {
        Self::new(MockConfig {
            is_configured: false,
            ..MockConfig::new(target)
        })
    }

    /// A platform with a character limit
    pub fn with_limit(target: PublishTarget, limit: usize) -> Self {
        Self::new(MockConfig {
            character_limit: Some(limit),
            ..MockConfig::new(target)
        })
    }

    /// Get the number of times post was called
    pub fn post_call_count(&self) -> usize {
        self.config.posted_content.lock().unwrap().len()
    }

    /// Get all content that was posted
    pub fn posted_content(&self) -> Vec<String> {
        self.config.posted_content.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    fn target(&self) -> PublishTarget {
        self.config.target
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured
    }

    fn character_limit(&self) -> Option<usize> {
        self.config.character_limit
    }

    async fn post(&self, content: &str) -> Result<Option<String>, PlatformError> {
        self.config
            .posted_content
            .lock()
            .unwrap()
            .push(content.to_string());

        match &self.config.post_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.config.remote_id.clone()),
        }
    }
}
