//! Configuration loading
//!
//! Settings are layered: built-in defaults, then the TOML config file, then
//! environment variables (a `.env` file is honoured). The Genius access token
//! is normally supplied only through `GENIUS_TOKEN`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use tracing::debug;

use crate::error::{ConfigError, Result};

pub mod env;
pub mod validation;

use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

/// Genius caps `per_page` at 50 on every listing endpoint.
pub const MAX_PAGE_SIZE: u64 = 50;

fn default_api_base_url() -> String {
    "https://api.genius.com".to_string()
}

fn default_public_api_base_url() -> String {
    "https://genius.com/api".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_page_size() -> u64 {
    10
}

fn default_remove_section_headers() -> bool {
    true
}

fn default_excluded_terms() -> Vec<String> {
    vec!["(Remix)".to_string(), "(Live)".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Bearer credential for the Genius API. Never printed.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Genius API client access token
    #[serde(default, skip_serializing)]
    pub genius_token: Option<AccessToken>,

    /// Authenticated REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Public (web) API base URL, used for typed search, albums and tracks
    #[serde(default = "default_public_api_base_url")]
    pub public_api_base_url: String,

    /// Timeout applied to every outbound request
    #[serde(default = "default_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Page size used when a caller does not pass one
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Strip `[Verse 1]` style headers from lyrics
    #[serde(default = "default_remove_section_headers")]
    pub remove_section_headers: bool,

    /// Skip search hits that are not songs (track lists, credits, ...)
    #[serde(default)]
    pub skip_non_songs: bool,

    /// Song titles containing one of these terms are passed over when
    /// resolving lyrics
    #[serde(default = "default_excluded_terms")]
    pub excluded_terms: Vec<String>,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub prompts: PromptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Append logs to this file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Log to stderr even when no file is configured
    #[serde(default)]
    pub dev_mode: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            dev_mode: false,
        }
    }
}

/// Optional Handlebars overrides for the built-in prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default)]
    pub analyze_lyrics: Option<String>,

    #[serde(default)]
    pub compare_songs: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genius_token: None,
            api_base_url: default_api_base_url(),
            public_api_base_url: default_public_api_base_url(),
            request_timeout_seconds: default_timeout_seconds(),
            default_page_size: default_page_size(),
            remove_section_headers: default_remove_section_headers(),
            skip_non_songs: false,
            excluded_terms: default_excluded_terms(),
            log: LogConfig::default(),
            prompts: PromptConfig::default(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::FileNotFound { path }.into());
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        // Environment variables win over the file
        config.load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    fn load_from_env(&mut self) -> Result<()> {
        if let Some(token) = EnvParser::parse_string(EnvVars::GENIUS_TOKEN)? {
            self.genius_token = Some(AccessToken::new(token));
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::API_BASE_URL)? {
            self.api_base_url = url;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::PUBLIC_API_BASE_URL)? {
            self.public_api_base_url = url;
        }

        if let Some(timeout) = EnvParser::parse_u64(EnvVars::TIMEOUT_SECONDS, 1, 300)? {
            self.request_timeout_seconds = timeout;
        }

        if let Some(page_size) = EnvParser::parse_u64(EnvVars::DEFAULT_PAGE_SIZE, 1, MAX_PAGE_SIZE)? {
            self.default_page_size = page_size;
        }

        if let Some(remove) = EnvParser::parse_bool(EnvVars::REMOVE_SECTION_HEADERS)? {
            self.remove_section_headers = remove;
        }

        if let Some(skip) = EnvParser::parse_bool(EnvVars::SKIP_NON_SONGS)? {
            self.skip_non_songs = skip;
        }

        if let Some(terms) = EnvParser::parse_list(EnvVars::EXCLUDED_TERMS)? {
            self.excluded_terms = terms;
        }

        if let Some(level) = EnvParser::parse_string(EnvVars::LOG_LEVEL)? {
            self.log.level = level;
        }

        if let Some(file) = EnvParser::parse_path(EnvVars::LOG_FILE)? {
            self.log.file = Some(file);
        }

        if let Some(dev) = EnvParser::parse_bool(EnvVars::DEV_MODE)? {
            self.log.dev_mode = dev;
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_url(&self.api_base_url, "Genius API")?;
        ConfigValidator::validate_url(&self.public_api_base_url, "Genius public API")?;
        ConfigValidator::validate_range(self.request_timeout_seconds, 1, 300, "request timeout seconds")?;
        ConfigValidator::validate_range(self.default_page_size, 1, MAX_PAGE_SIZE, "default page size")?;
        ConfigValidator::validate_log_level(&self.log.level)?;
        Ok(())
    }

    /// The token is only needed by commands that talk to Genius, so its
    /// absence is reported here rather than in `validate`.
    pub fn require_token(&self) -> std::result::Result<&AccessToken, ConfigError> {
        self.genius_token.as_ref().ok_or_else(|| ConfigError::MissingField {
            field: EnvVars::GENIUS_TOKEN.to_string(),
        })
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "genius", "genius-mcp")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::error::GeniusMcpError::Internal(e.into()))
    }
}
