//! Session & Content Config

use std::path::PathBuf;

use clap::Args;

use super::AppConfigError;

/// Session and content file locations.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// File holding the signed-in session (defaults to the user data directory)
    #[arg(long, env = "LOTUS_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// YAML file with testimonials and blog posts
    #[arg(long, env = "LOTUS_CONTENT_FILE", default_value = "content.yaml")]
    pub content_file: PathBuf,
}

impl SessionArgs {
    /// Resolve the session file path.
    ///
    /// # Errors
    ///
    /// Returns an error if no path was given and there is no data directory.
    pub fn session_path(&self) -> Result<PathBuf, AppConfigError> {
        if let Some(path) = &self.session_file {
            return Ok(path.clone());
        }

        dirs::data_dir()
            .map(|dir| dir.join("lotus").join("session.json"))
            .ok_or(AppConfigError::NoDataDir)
    }
}
