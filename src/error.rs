//! Error handling for the genius-mcp server
//!
//! Errors are split the same way the rest of the crate is: `LookupError` is
//! what the lookup adapter hands back to callers, `UpstreamError` describes
//! failures talking to Genius, and `GeniusMcpError` wraps everything the
//! binary can fail with at startup or on the command line.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeniusMcpError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Failure of a single adapter operation.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Prompt rendering failed: {0}")]
    Template(#[from] TemplateError),
}

/// Coarse classification of a `LookupError`, stable enough to put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    InvalidArgument,
    NotFound,
    Upstream,
    Internal,
}

impl LookupErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupErrorKind::InvalidArgument => "invalid_argument",
            LookupErrorKind::NotFound => "not_found",
            LookupErrorKind::Upstream => "upstream_error",
            LookupErrorKind::Internal => "internal_error",
        }
    }
}

impl LookupError {
    pub fn invalid(message: impl Into<String>) -> Self {
        LookupError::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        LookupError::NotFound(message.into())
    }

    pub fn kind(&self) -> LookupErrorKind {
        match self {
            LookupError::InvalidArgument(_) => LookupErrorKind::InvalidArgument,
            LookupError::NotFound(_) => LookupErrorKind::NotFound,
            LookupError::Upstream(_) => LookupErrorKind::Upstream,
            LookupError::Template(_) => LookupErrorKind::Internal,
        }
    }
}

/// Failure talking to the Genius API or fetching a song page.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("Authentication with Genius failed (check GENIUS_TOKEN)")]
    Authentication,

    #[error("Genius API rate limit exceeded")]
    RateLimit,

    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

impl UpstreamError {
    pub fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else {
            UpstreamError::Http {
                endpoint: endpoint.to_string(),
                source: err,
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Missing required setting: {field}")]
    MissingField { field: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Invalid template '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Failed to render '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

pub type Result<T> = std::result::Result<T, GeniusMcpError>;

impl From<toml::de::Error> for GeniusMcpError {
    fn from(err: toml::de::Error) -> Self {
        GeniusMcpError::Config(ConfigError::InvalidFormat(err))
    }
}
