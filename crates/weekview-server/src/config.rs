//! Environment-driven configuration
//!
//! The service is configured entirely through the environment, matching
//! the deployment contract: `PROJECT_ID` and `API_TOKEN` are mandatory,
//! `PORT` defaults to 5000, and setting `DEBUG` turns on verbose logging.

use std::env;

/// Process configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tracker project to render
    pub project_id: u64,
    /// Static per-process credential token
    pub api_token: String,
    /// Listen port
    pub port: u16,
    /// Verbose logging
    pub debug: bool,
}

/// Configuration failure at startup
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A mandatory variable is absent
    #[error("missing required environment variable {name}")]
    Missing {
        /// Variable name
        name: &'static str,
    },

    /// A variable is present but unparseable
    #[error("environment variable {name} has an invalid value")]
    Invalid {
        /// Variable name
        name: &'static str,
    },
}

impl Config {
    /// Read the configuration from the process environment
    ///
    /// # Errors
    /// `ConfigError` when a mandatory variable is missing or unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through an arbitrary lookup (testable)
    ///
    /// # Errors
    /// `ConfigError` when a mandatory variable is missing or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let project_id = lookup("PROJECT_ID")
            .ok_or(ConfigError::Missing { name: "PROJECT_ID" })?
            .parse()
            .map_err(|_| ConfigError::Invalid { name: "PROJECT_ID" })?;

        let api_token = lookup("API_TOKEN").ok_or(ConfigError::Missing { name: "API_TOKEN" })?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid { name: "PORT" })?,
            None => 5000,
        };

        Ok(Self {
            project_id,
            api_token,
            port,
            debug: lookup("DEBUG").is_some(),
        })
    }
}
