//! Dashboard configuration module

use clap::Args;
use thiserror::Error;

use crate::config::{api::ApiArgs, logging::LoggingConfig, session::SessionArgs};

pub mod api;
pub mod logging;
pub mod session;

/// Errors raised while turning flags into runtime settings.
#[derive(Debug, Error)]
pub enum AppConfigError {
    /// The backend address was rejected.
    #[error("invalid api url: {0}")]
    Api(#[from] lotus::api::ConfigError),

    /// No session file was given and the platform has no data directory.
    #[error("could not determine a data directory for the session file; pass --session-file")]
    NoDataDir,
}

/// Lotus dashboard configuration
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Backend connection settings.
    #[command(flatten)]
    pub api: ApiArgs,

    /// Session and content file locations.
    #[command(flatten)]
    pub session: SessionArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
