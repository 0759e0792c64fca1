//! Backend connection config

use std::time::Duration;

use clap::Args;
use lotus::api::{ApiConfig, ConfigError, UnauthorizedPolicy};

/// Backend connection settings.
#[derive(Debug, Args)]
pub struct ApiArgs {
    /// Root address of the studio backend, e.g. `https://api.example.com`
    #[arg(long, env = "LOTUS_API_URL")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "LOTUS_API_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub timeout_seconds: u64,

    /// Clear the stored session when the backend answers 401
    #[arg(long, env = "LOTUS_CLEAR_ON_UNAUTHORIZED", default_value_t = false)]
    pub clear_on_unauthorized: bool,
}

impl ApiArgs {
    /// # Errors
    ///
    /// Returns an error if the api url is not an absolute http(s) address.
    pub fn to_api_config(&self) -> Result<ApiConfig, ConfigError> {
        let policy = if self.clear_on_unauthorized {
            UnauthorizedPolicy::ClearSession
        } else {
            UnauthorizedPolicy::Surface
        };

        Ok(ApiConfig::new(&self.api_url)?
            .with_timeout(Duration::from_secs(self.timeout_seconds))
            .with_unauthorized_policy(policy))
    }
}
