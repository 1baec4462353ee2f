//! Generate-then-publish orchestration
//!
//! A [`Runner`] asks its generator for text once, then hands that text to
//! every platform in order. Publishing is sequential and never short-circuits:
//! a failure at one destination is logged and the next one is still tried.

use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::generator::{self, ContentGenerator};
use crate::platforms::{
    facebook::FacebookClient, linkedin::LinkedInClient, twitter::TwitterClient, Platform,
};
use crate::prompts::PromptTemplate;
use crate::types::{GenerationResult, PublishResult, PublishTarget, RunReport, RunState};

/// Build platform clients for `targets`, in the same order.
///
/// Each client evaluates its configuration predicate here, once; an
/// unconfigured client is still returned so the run reports it as skipped.
pub fn create_platforms(
    config: &Config,
    http_client: &Client,
    targets: &[PublishTarget],
) -> Vec<Box<dyn Platform>> {
    targets
        .iter()
        .map(|target| -> Box<dyn Platform> {
            match target {
                PublishTarget::Twitter => {
                    Box::new(TwitterClient::new(&config.twitter, http_client.clone()))
                }
                PublishTarget::LinkedIn => {
                    Box::new(LinkedInClient::new(&config.linkedin, http_client.clone()))
                }
                PublishTarget::Facebook => {
                    Box::new(FacebookClient::new(&config.facebook, http_client.clone()))
                }
            }
        })
        .collect()
}

pub struct Runner {
    generator: Box<dyn ContentGenerator>,
    platforms: Vec<Box<dyn Platform>>,
}

impl Runner {
    pub fn new(generator: Box<dyn ContentGenerator>, platforms: Vec<Box<dyn Platform>>) -> Self {
        Self {
            generator,
            platforms,
        }
    }

    /// Generate content without publishing it
    pub async fn preview(&self, template: &PromptTemplate, date: NaiveDate) -> GenerationResult {
        generator::generate(self.generator.as_ref(), template, date).await
    }

    /// Execute one run for `template` on `date`.
    ///
    /// The report's state is `Aborted` when generation failed (no platform
    /// was invoked) and `Done` otherwise, whatever the individual publish
    /// outcomes were.
    pub async fn run(&self, template: &PromptTemplate, date: NaiveDate) -> RunReport {
        self.run_with(template, date, |_| {}).await
    }

    /// Like [`Runner::run`], calling `on_generated` with the text before
    /// any platform is invoked.
    pub async fn run_with<F>(
        &self,
        template: &PromptTemplate,
        date: NaiveDate,
        on_generated: F,
    ) -> RunReport
    where
        F: FnOnce(&str),
    {
        let mut state = RunState::Idle;

        transition(&mut state, RunState::Generating);
        let content = match self.preview(template, date).await {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to generate content. Exiting.");
                transition(&mut state, RunState::Aborted);
                return RunReport {
                    state,
                    content: None,
                    results: Vec::new(),
                    generation_error: Some(e),
                };
            }
        };

        on_generated(&content);

        transition(&mut state, RunState::Publishing);
        let results = self.publish_all(&content).await;

        transition(&mut state, RunState::Done);
        info!(
            "Run complete: {} of {} destination(s) posted",
            results.iter().filter(|r| r.succeeded()).count(),
            results.len()
        );

        RunReport {
            state,
            content: Some(content),
            results,
            generation_error: None,
        }
    }

    /// Publish `content` to every platform, one after another
    pub async fn publish_all(&self, content: &str) -> Vec<PublishResult> {
        let mut results = Vec::with_capacity(self.platforms.len());
        for platform in &self.platforms {
            results.push(platform.publish(content).await);
        }
        results
    }
}

fn transition(state: &mut RunState, next: RunState) {
    debug!("Run state: {} -> {}", state, next);
    *state = next;
}
