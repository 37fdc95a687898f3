//! Server configuration parsed from environment variables.
//!
//! ERROR HANDLING
//! ==============
//! Missing required values and unparseable numbers are reported as
//! [`ConfigError`]; `main` logs the error and exits before binding.

use client::net::types::{DEFAULT_TIMEOUT_SECS, FirebaseConfig};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Public web config handed to the browser.
    pub firebase: FirebaseConfig,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Required:
    /// - `FIREBASE_API_KEY`
    /// - `FIREBASE_PROJECT_ID`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `FIREBASE_AUTH_DOMAIN`: default `{project}.firebaseapp.com`
    /// - `GOOGLE_OAUTH_CLIENT_ID`: Google sign-in is unavailable without it
    /// - `GATEWAY_TIMEOUT_SECS`: default 15
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a missing required value or an
    /// unparseable number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_key = var("FIREBASE_API_KEY").ok_or(ConfigError::Missing { var: "FIREBASE_API_KEY" })?;
        let project_id = var("FIREBASE_PROJECT_ID").ok_or(ConfigError::Missing { var: "FIREBASE_PROJECT_ID" })?;
        let auth_domain = var("FIREBASE_AUTH_DOMAIN").unwrap_or_else(|| format!("{project_id}.firebaseapp.com"));
        let google_client_id = var("GOOGLE_OAUTH_CLIENT_ID");

        let port = parse_number("PORT", var("PORT"), DEFAULT_PORT)?;
        let timeout_secs = parse_number("GATEWAY_TIMEOUT_SECS", var("GATEWAY_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid { var: "GATEWAY_TIMEOUT_SECS", value: "0".into() });
        }

        Ok(Self {
            port,
            firebase: FirebaseConfig { api_key, project_id, auth_domain, google_client_id, timeout_secs },
        })
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
