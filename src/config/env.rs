use std::env;
use std::path::PathBuf;
use crate::error::{Result, GeniusMcpError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const GENIUS_TOKEN: &'static str = "GENIUS_TOKEN";
    pub const API_BASE_URL: &'static str = "GENIUS_MCP_API_BASE_URL";
    pub const PUBLIC_API_BASE_URL: &'static str = "GENIUS_MCP_PUBLIC_API_BASE_URL";
    pub const TIMEOUT_SECONDS: &'static str = "GENIUS_MCP_TIMEOUT_SECONDS";
    pub const DEFAULT_PAGE_SIZE: &'static str = "GENIUS_MCP_DEFAULT_PAGE_SIZE";
    pub const REMOVE_SECTION_HEADERS: &'static str = "GENIUS_MCP_REMOVE_SECTION_HEADERS";
    pub const SKIP_NON_SONGS: &'static str = "GENIUS_MCP_SKIP_NON_SONGS";
    pub const EXCLUDED_TERMS: &'static str = "GENIUS_MCP_EXCLUDED_TERMS";

    // Logging, shared with other MCP servers
    pub const LOG_LEVEL: &'static str = "MCP_LOG_LEVEL";
    pub const LOG_FILE: &'static str = "MCP_LOG_FILE";
    pub const DEV_MODE: &'static str = "MCP_DEV_MODE";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as a trimmed string; blank counts as unset
    pub fn parse_string(var_name: &str) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(GeniusMcpError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Parse environment variable as PathBuf
    pub fn parse_path(var_name: &str) -> Result<Option<PathBuf>> {
        Ok(Self::parse_string(var_name)?.map(PathBuf::from))
    }

    /// Parse environment variable as boolean with validation
    pub fn parse_bool(var_name: &str) -> Result<Option<bool>> {
        if let Some(value_str) = Self::parse_string(var_name)? {
            match value_str.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(GeniusMcpError::Validation(format!(
                    "Invalid boolean value in {}: '{}'. Use: true/false, 1/0, yes/no, on/off",
                    var_name, value_str
                )))
            }
        } else {
            Ok(None)
        }
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                GeniusMcpError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a positive integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(GeniusMcpError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Parse a comma separated list, dropping empty items
    pub fn parse_list(var_name: &str) -> Result<Option<Vec<String>>> {
        Ok(Self::parse_string(var_name)?.map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        }))
    }
}
