//! Dailycast - generated daily posts for social platforms
//!
//! This library asks a completion service for a piece of text built from a
//! prompt template and the current date, then publishes that text to the
//! selected platforms one after another.

pub mod config;
pub mod credentials;
pub mod error;
pub mod generator;
pub mod logging;
pub mod platforms;
pub mod prompts;
pub mod runner;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{DailycastError, Result};
pub use runner::Runner;
pub use types::{Destination, PublishResult, PublishTarget, RunReport, RunState};
