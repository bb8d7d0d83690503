//! Runtime configuration read once at startup. Everything comes from the
//! environment with sensible defaults so the console runs out of the box
//! against a local backend.

use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SAKTI_API_BASE '{0}': {1}")]
    BadBaseUrl(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Origin for all backend calls, e.g. `https://api.sakti.example.com`.
    pub api_base: Url,
    /// Durable token file. Presence of this file is the sole signal of a
    /// prior session; it holds exactly the bearer token string.
    pub token_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var("SAKTI_API_BASE")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
        let api_base =
            Url::parse(&base).map_err(|e| ConfigError::BadBaseUrl(base, e.to_string()))?;
        let token_file = std::env::var("SAKTI_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_path());
        Ok(Self { api_base, token_file })
    }
}

fn default_token_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".sakti").join("token")
}
