use anyhow::{Context, Result};

use crate::agent_client::DEFAULT_AGENT_ID;
use crate::profile::session::DEFAULT_SESSION_TTL_SECS;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub agent_api_url: String,
    pub agent_api_key: String,
    pub agent_id: String,
    pub agent_timeout_secs: u64,
    pub session_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            agent_api_url: require_env("AGENT_API_URL")?,
            agent_api_key: require_env("AGENT_API_KEY")?,
            agent_id: std::env::var("AGENT_ID").unwrap_or_else(|_| DEFAULT_AGENT_ID.to_string()),
            agent_timeout_secs: std::env::var("AGENT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("AGENT_TIMEOUT_SECS must be a whole number of seconds")?,
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_SESSION_TTL_SECS.to_string())
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
