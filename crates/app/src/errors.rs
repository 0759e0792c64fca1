//! Command errors

use lotus::{api::ApiError, context::AppInitError, guard::Route};
use thiserror::Error;

use crate::{config::AppConfigError, content::ContentError, notifications::Notification};

/// Why a command did not complete. Rendered once, as a notification.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The route guard redirected to the login page.
    #[error("login required to open {from}")]
    LoginRequired { from: Route },

    /// An operation failed and already produced its toast.
    #[error("{0}")]
    Failed(Notification),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Config(#[from] AppConfigError),

    #[error(transparent)]
    Init(#[from] AppInitError),
}

impl CommandError {
    #[must_use]
    pub fn to_notification(&self) -> Notification {
        match self {
            Self::LoginRequired { from } => Notification::destructive(
                "Login required",
                format!("sign in with `lotus-app login` to open {from}"),
            ),
            Self::Failed(notification) => notification.clone(),
            Self::Api(error) => Notification::from_error("Request failed", error),
            Self::Content(error) => Notification::destructive("Content error", error.to_string()),
            Self::Config(error) => Notification::destructive("Configuration error", error.to_string()),
            Self::Init(error) => Notification::destructive("Startup failed", error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_names_the_blocked_route() {
        let error = CommandError::LoginRequired { from: Route::Orders };

        assert_eq!(
            error.to_notification().to_string(),
            "[error] Login required: sign in with `lotus-app login` to open /admin/orders"
        );
    }
}
