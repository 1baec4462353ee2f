//! Core types for Dailycast

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Everything the completion service needs for one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Persona framing sent as the system message
    pub system_instruction: String,
    /// Rendered user prompt
    pub instruction_text: String,
    pub model_name: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// Generated text, or the reason there is none
pub type GenerationResult = std::result::Result<String, GenerationError>;

/// A destination platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishTarget {
    /// Microblog (Twitter / X)
    Twitter,
    /// Professional network (LinkedIn)
    LinkedIn,
    /// Page feed (Facebook Page)
    Facebook,
}

impl PublishTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishTarget::Twitter => "twitter",
            PublishTarget::LinkedIn => "linkedin",
            PublishTarget::Facebook => "facebook",
        }
    }

    /// Human-facing platform name used in log lines
    pub fn display_name(&self) -> &'static str {
        match self {
            PublishTarget::Twitter => "Twitter",
            PublishTarget::LinkedIn => "LinkedIn",
            PublishTarget::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination subset selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Twitter,
    LinkedIn,
    Facebook,
    /// Twitter and LinkedIn
    Both,
    /// Every supported platform
    All,
}

impl Destination {
    pub const VARIANTS: [&'static str; 5] = ["twitter", "linkedin", "facebook", "both", "all"];

    /// Targets to attempt, in publishing order
    pub fn targets(&self) -> Vec<PublishTarget> {
        match self {
            Destination::Twitter => vec![PublishTarget::Twitter],
            Destination::LinkedIn => vec![PublishTarget::LinkedIn],
            Destination::Facebook => vec![PublishTarget::Facebook],
            Destination::Both => vec![PublishTarget::Twitter, PublishTarget::LinkedIn],
            Destination::All => vec![
                PublishTarget::Twitter,
                PublishTarget::LinkedIn,
                PublishTarget::Facebook,
            ],
        }
    }
}

impl FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twitter" => Ok(Destination::Twitter),
            "linkedin" => Ok(Destination::LinkedIn),
            "facebook" => Ok(Destination::Facebook),
            "both" => Ok(Destination::Both),
            "all" => Ok(Destination::All),
            _ => Err(format!(
                "Invalid destination: '{}'. Valid options: {}",
                s,
                Destination::VARIANTS.join(", ")
            )),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Destination::Twitter => "twitter",
            Destination::LinkedIn => "linkedin",
            Destination::Facebook => "facebook",
            Destination::Both => "both",
            Destination::All => "all",
        };
        f.write_str(name)
    }
}

/// What happened at one destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PublishOutcome {
    Posted { remote_id: Option<String> },
    /// Credentials absent; no request was made
    Skipped { reason: String },
    Failed { detail: String },
}

/// Result of publishing to a single destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    pub target: PublishTarget,
    pub outcome: PublishOutcome,
}

impl PublishResult {
    pub fn posted(target: PublishTarget, remote_id: Option<String>) -> Self {
        Self {
            target,
            outcome: PublishOutcome::Posted { remote_id },
        }
    }

    pub fn skipped(target: PublishTarget, reason: impl Into<String>) -> Self {
        Self {
            target,
            outcome: PublishOutcome::Skipped {
                reason: reason.into(),
            },
        }
    }

    pub fn failed(target: PublishTarget, detail: impl Into<String>) -> Self {
        Self {
            target,
            outcome: PublishOutcome::Failed {
                detail: detail.into(),
            },
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, PublishOutcome::Posted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, PublishOutcome::Skipped { .. })
    }

    pub fn remote_id(&self) -> Option<&str> {
        match &self.outcome {
            PublishOutcome::Posted { remote_id } => remote_id.as_deref(),
            _ => None,
        }
    }

    /// Failure detail, or the skip reason for unconfigured destinations
    pub fn error_detail(&self) -> Option<&str> {
        match &self.outcome {
            PublishOutcome::Posted { .. } => None,
            PublishOutcome::Skipped { reason } => Some(reason),
            PublishOutcome::Failed { detail } => Some(detail),
        }
    }
}

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Generating,
    Publishing,
    Done,
    /// Generation failed; nothing was published
    Aborted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Generating => "generating",
            RunState::Publishing => "publishing",
            RunState::Done => "done",
            RunState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub state: RunState,
    pub content: Option<String>,
    pub results: Vec<PublishResult>,
    pub generation_error: Option<GenerationError>,
}

impl RunReport {
    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }
}
