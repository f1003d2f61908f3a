use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_API_URL;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset values fall back to local defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file backing the state store when Redis is not configured.
    pub state_path: PathBuf,
    /// When set, persisted state lives in Redis instead of `state_path`.
    pub redis_url: Option<String>,
    pub openai_api_url: String,
    pub llm_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            state_path: optional_env("STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("rewriter_state.json")),
            redis_url: optional_env("REDIS_URL"),
            openai_api_url: optional_env("OPENAI_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            llm_timeout_secs: parse_timeout_secs(
                &std::env::var("LLM_TIMEOUT_SECS").unwrap_or_else(|_| "120".to_string()),
            )?,
        })
    }
}

/// Treats an empty variable the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// A zero timeout would fail every completion call, so it is rejected.
fn parse_timeout_secs(raw: &str) -> Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("LLM_TIMEOUT_SECS must be greater than zero");
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_parses_positive_seconds() {
        assert_eq!(parse_timeout_secs("120").unwrap(), 120);
        assert_eq!(parse_timeout_secs(" 5 ").unwrap(), 5);
    }

    #[test]
    fn test_timeout_rejects_zero_and_garbage() {
        let err = parse_timeout_secs("0").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
        assert!(parse_timeout_secs("soon").is_err());
        assert!(parse_timeout_secs("-1").is_err());
    }
}
