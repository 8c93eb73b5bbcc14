//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so the client works against a local
//! development server with no configuration at all.

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the diary REST API, without a trailing slash.
    /// Env: `RELETTER_API_URL`
    /// Default: `http://localhost:4000`
    pub api_url: String,

    /// Transport-level request timeout. The client applies no timeout of its
    /// own when this is unset.
    /// Env: `RELETTER_HTTP_TIMEOUT_SECS`
    pub request_timeout: Option<Duration>,

    /// Access token for the current session.
    /// Env: `RELETTER_ACCESS_TOKEN`
    pub access_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            access_token: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` is this with
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("RELETTER_API_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout = lookup("RELETTER_HTTP_TIMEOUT_SECS").and_then(|v| {
            match v.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(e) => {
                    warn!("Ignoring RELETTER_HTTP_TIMEOUT_SECS='{}': {}", v, e);
                    None
                }
            }
        });

        let access_token = lookup("RELETTER_ACCESS_TOKEN").filter(|v| !v.trim().is_empty());

        Self {
            api_url,
            request_timeout,
            access_token,
        }
    }
}
