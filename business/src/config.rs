use std::env::vars;
use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;
use userdesk_states::snapshot_state;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8888";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where the admin API lives and how long a request may take.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Bearer token handed over by the surrounding session provider at startup.
    pub api_token: Option<String>,
    pub request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    api_token: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl BusinessConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            api_base_url: base_url,
            ..Self::default()
        }
    }

    /// Reads `API_BASE_URL`, `API_TOKEN` and `REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        let raw: RawConfig =
            serde_env::from_iter(vars()).context("failed to read configuration from environment")?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            api_base_url,
            api_token,
            request_timeout_secs,
        } = raw;

        let timeout_secs = request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        let api_base_url = api_base_url
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        log::info!("Using API base URL {api_base_url}");

        Ok(Self {
            api_base_url,
            api_token: api_token.filter(|token| !token.trim().is_empty()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Versioned API root, e.g. `http://host/api/v1`.
    pub fn api_url(&self) -> String {
        format!("{}/api/v1", self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

snapshot_state!(BusinessConfig);
