//! Configuration module for environment variables and client settings

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_SESSION_FILE: &str = ".canteen-session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the canteen backend, without a trailing slash
    pub api_base_url: String,

    /// Transport timeout applied to every request
    pub request_timeout: Duration,

    /// Where the session store persists the token and user
    pub session_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        if dotenv::dotenv().is_ok() {
            tracing::debug!("Loaded variables from .env");
        }

        let base = env::var("CANTEEN_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match env::var("CANTEEN_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("CANTEEN_HTTP_TIMEOUT_SECS is not a number: {raw}"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let session_file = env::var("CANTEEN_SESSION_FILE")
            .unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_string());

        Self::new(&base, Duration::from_secs(timeout_secs), session_file)
    }

    /// Build a configuration from explicit values
    pub fn new(
        api_base_url: &str,
        request_timeout: Duration,
        session_file: impl Into<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            request_timeout,
            session_file: session_file.into(),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw.trim()).context("Failed to parse backend base URL")?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(anyhow!(
            "Invalid backend URL scheme {}, expected http or https",
            parsed.scheme()
        ));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
