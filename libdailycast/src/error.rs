//! Error types for Dailycast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DailycastError>;

#[derive(Error, Debug)]
pub enum DailycastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DailycastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DailycastError::InvalidInput(_) => 3,
            DailycastError::Platform(PlatformError::Authentication(_)) => 2,
            DailycastError::Platform(_) => 1,
            DailycastError::Generation(_) => 1,
            DailycastError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Failure to obtain usable text from the completion service
#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse completion response: {0}")]
    Parse(String),

    #[error("Completion service returned no usable text")]
    Empty,
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("{0} credentials not configured")]
    NotConfigured(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Posting failed: {0}")]
    Posting(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for PlatformError {
    fn from(error: reqwest::Error) -> Self {
        PlatformError::Network(error.to_string())
    }
}
