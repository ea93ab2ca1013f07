use std::{env, time::Duration};

use crate::{Error, Result};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, request_timeout: Duration) -> Self {
        let api_url = api_url.into();

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout,
        }
    }

    /// Reads `ADMIN_API_URL` (required) and `ADMIN_REQUEST_TIMEOUT_SECS`.
    /// `api_url_override` wins over the environment when present.
    pub fn from_env(api_url_override: Option<String>) -> Result<Self> {
        let api_url = match api_url_override {
            Some(url) => url,
            None => env::var("ADMIN_API_URL")
                .map_err(|_| Error::EnvVarError("ADMIN_API_URL not found".to_string()))?,
        };

        let timeout_secs = env::var("ADMIN_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self::new(api_url, Duration::from_secs(timeout_secs)))
    }
}
