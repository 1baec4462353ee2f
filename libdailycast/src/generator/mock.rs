//! Scripted generator for tests
//!
//! Available in all builds so integration tests and the binaries' tests can
//! drive the runner without network access.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::generator::ContentGenerator;
use crate::types::{GenerationRequest, GenerationResult};

#[derive(Debug, Clone)]
pub struct MockGenerator {
    response: GenerationResult,
    model: Option<String>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    /// Always returns `text`
    pub fn succeeding(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            model: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fails with `error`
    pub fn failing(error: GenerationError) -> Self {
        Self {
            response: Err(error),
            model: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn complete(&self, request: &GenerationRequest) -> GenerationResult {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone()
    }

    fn model_override(&self) -> Option<&str> {
        self.model.as_deref()
    }
}
