//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Path to the tenant map data file (default: ./data/tenants.json).
    pub data_file: PathBuf,

    /// Default language for normalization and display fallback (default: "en").
    pub default_language: String,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Bearer token table as `token:owner,token:owner` (default: empty).
    pub owner_tokens: String,

    /// Public site origin for constructing menu URLs.
    pub site_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let data_file = env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/tenants.json"));

        let default_language = env::var("DEFAULT_LANGUAGE")
            .unwrap_or_else(|_| "en".to_string())
            .to_lowercase();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let owner_tokens = env::var("OWNER_TOKENS").unwrap_or_default();

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

        Ok(Self {
            port,
            data_file,
            default_language,
            cors_allowed_origins,
            owner_tokens,
            site_url,
        })
    }
}
