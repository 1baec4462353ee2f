//! Configuration management for Dailycast
//!
//! Secrets come from the process environment (optionally seeded from a
//! `.env` file). Non-secret settings such as the model name or API base URLs
//! may also live in a TOML file; environment variables override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TWITTER_BASE_URL: &str = "https://api.twitter.com";
pub const DEFAULT_LINKEDIN_BASE_URL: &str = "https://api.linkedin.com";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Fully resolved configuration, built once per process
#[derive(Debug, Clone)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub twitter: TwitterConfig,
    pub linkedin: LinkedInConfig,
    pub facebook: FacebookConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    /// Overrides the model named by the prompt template
    pub model: Option<String>,
}

/// OAuth 1.0a user-context credentials for the microblog API
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub api_key: Option<SecretString>,
    pub api_secret: Option<SecretString>,
    pub access_token: Option<SecretString>,
    pub access_secret: Option<SecretString>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct LinkedInConfig {
    pub access_token: Option<SecretString>,
    pub person_id: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct FacebookConfig {
    pub access_token: Option<SecretString>,
    pub page_id: Option<String>,
    pub app_id: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Request timeout; `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
}

impl TwitterConfig {
    /// All four OAuth fields must be present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
            && self.api_secret.is_some()
            && self.access_token.is_some()
            && self.access_secret.is_some()
    }
}

impl LinkedInConfig {
    pub fn is_configured(&self) -> bool {
        self.access_token.is_some() && self.person_id.is_some()
    }
}

impl FacebookConfig {
    pub fn is_configured(&self) -> bool {
        self.access_token.is_some() && self.page_id.is_some()
    }
}

/// On-disk settings file. Secrets are deliberately not read from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub openai: OpenAiSection,
    pub http: HttpSection,
    pub twitter: EndpointSection,
    pub linkedin: EndpointSection,
    pub facebook: EndpointSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSection {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSection {
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Load settings from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: FileConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}

impl Config {
    /// Load configuration from `.env`, the settings file and the environment
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let path = resolve_config_path()?;
        let file = if path.exists() {
            tracing::debug!("Reading settings from {}", path.display());
            FileConfig::load_from_path(&path)?
        } else {
            FileConfig::default()
        };

        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a settings file with variables from `lookup`.
    ///
    /// Empty variables count as unset.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let secret = |key: &str| var(key).map(SecretString::from);

        Self {
            openai: OpenAiConfig {
                api_key: secret("OPENAI_API_KEY"),
                base_url: var("OPENAI_BASE_URL")
                    .or(file.openai.base_url)
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                model: var("DAILYCAST_MODEL").or(file.openai.model),
            },
            twitter: TwitterConfig {
                api_key: secret("TWITTER_API_KEY"),
                api_secret: secret("TWITTER_API_SECRET"),
                access_token: secret("TWITTER_ACCESS_TOKEN"),
                access_secret: secret("TWITTER_ACCESS_SECRET"),
                base_url: file
                    .twitter
                    .base_url
                    .unwrap_or_else(|| DEFAULT_TWITTER_BASE_URL.to_string()),
            },
            linkedin: LinkedInConfig {
                access_token: secret("LINKEDIN_ACCESS_TOKEN"),
                person_id: var("LINKEDIN_PERSON_ID"),
                base_url: file
                    .linkedin
                    .base_url
                    .unwrap_or_else(|| DEFAULT_LINKEDIN_BASE_URL.to_string()),
            },
            facebook: FacebookConfig {
                access_token: secret("FACEBOOK_ACCESS_TOKEN"),
                page_id: var("FACEBOOK_PAGE_ID"),
                app_id: var("FACEBOOK_APP_ID"),
                base_url: file
                    .facebook
                    .base_url
                    .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string()),
            },
            http: HttpConfig {
                timeout: file.http.timeout_secs.map(Duration::from_secs),
            },
        }
    }

    /// Build a shared HTTP client honoring `[http] timeout_secs`
    pub fn http_client(&self) -> reqwest::Client {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.http.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
    }
}

/// Resolve the settings file path following the XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("DAILYCAST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("dailycast").join("config.toml"))
}
