use url::Url;
use crate::error::{Result, GeniusMcpError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate an http(s) base URL
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            GeniusMcpError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(GeniusMcpError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }
        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(GeniusMcpError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate a log level name understood by tracing
    pub fn validate_log_level(level: &str) -> Result<()> {
        match level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "warning" | "error" | "critical" => Ok(()),
            _ => Err(GeniusMcpError::Validation(format!(
                "Unknown log level '{}'. Use one of: trace, debug, info, warn, error",
                level
            ))),
        }
    }
}
