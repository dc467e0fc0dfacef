use crate::errors::{NymeriaError, Result};
use std::time::Duration;

/// Version of the Nymeria API this client speaks.
pub const API_VERSION: &str = "4";

/// Base URL every endpoint path is appended to.
pub const BASE_URL: &str = "https://www.nymeria.io/api/v4";

/// User agent sent with every request.
pub const USER_AGENT: &str = "nymeria.rs/4";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration: credentials, endpoint and transport settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Creates a configuration with the given API key and the default
    /// endpoint, user agent and timeout.
    ///
    /// The key is trimmed; a blank key is rejected with
    /// [`NymeriaError::InvalidAuthKey`].
    pub fn new(api_key: &str) -> Result<Self> {
        Ok(Self {
            api_key: normalize_key(api_key)?,
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replaces the API key. On error the current key is kept.
    pub fn set_auth(&mut self, api_key: &str) -> Result<()> {
        self.api_key = normalize_key(api_key)?;
        Ok(())
    }

    /// The trimmed API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Points the client at another endpoint; a trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from the environment (and `.env` if present).
    ///
    /// - `NYMERIA_API_KEY` (required)
    /// - `NYMERIA_BASE_URL` (optional, http:// or https://)
    /// - `NYMERIA_TIMEOUT_SECS` (optional, positive integer)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("NYMERIA_API_KEY")
            .map_err(|_| anyhow::anyhow!("NYMERIA_API_KEY environment variable required"))?;
        let mut config = Self::new(&api_key)
            .map_err(|_| anyhow::anyhow!("NYMERIA_API_KEY cannot be empty"))?;

        if let Some(url) = std::env::var("NYMERIA_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
        {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("NYMERIA_BASE_URL must start with http:// or https://");
            }
            config = config.with_base_url(url);
        }

        if let Ok(secs) = std::env::var("NYMERIA_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    anyhow::anyhow!("NYMERIA_TIMEOUT_SECS must be a positive number of seconds")
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Nymeria Base URL: {}", config.base_url);
        tracing::debug!("Request timeout: {:?}", config.timeout);

        Ok(config)
    }
}

fn normalize_key(api_key: &str) -> Result<String> {
    let key = api_key.trim();
    if key.is_empty() {
        return Err(NymeriaError::InvalidAuthKey);
    }
    Ok(key.to_string())
}
