//! Backend address configuration.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Invalid backend configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api root url")]
    InvalidUrl(#[from] url::ParseError),

    #[error("api root url must use http or https")]
    UnsupportedScheme,

    #[error("failed to build http client")]
    HttpClient(#[source] reqwest::Error),
}

/// Logical group of backend endpoints sharing a base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubService {
    /// Instructors and bookings.
    Yoga,
    /// Shop items and orders.
    Store,
    /// Admin login and user list.
    Users,
}

impl SubService {
    /// Path below the root backend address.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Yoga => "/api/yoga",
            Self::Store => "/api/store",
            Self::Users => "/api/users",
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yoga => "yoga",
            Self::Store => "store",
            Self::Users => "users",
        }
    }

    const fn segments(self) -> [&'static str; 2] {
        ["api", self.name()]
    }
}

/// What the client does when the backend answers `401 Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnauthorizedPolicy {
    /// Report the failure to the caller and leave the credential alone.
    #[default]
    Surface,

    /// Also clear the stored credential so the next guard check locks.
    ClearSession,
}

/// Base URLs for every sub-service, composed once from the root address.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    root: Url,
    yoga: Url,
    store: Url,
    users: Url,
    timeout: Duration,
    unauthorized: UnauthorizedPolicy,
}

impl ApiConfig {
    /// Build configuration from the root backend address.
    ///
    /// # Errors
    ///
    /// Returns an error when `root` is not an absolute http(s) URL.
    pub fn new(root: &str) -> Result<Self, ConfigError> {
        let root = Url::parse(root.trim())?;

        if !matches!(root.scheme(), "http" | "https") || root.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedScheme);
        }

        Ok(Self {
            yoga: join(&root, &SubService::Yoga.segments()),
            store: join(&root, &SubService::Store.segments()),
            users: join(&root, &SubService::Users.segments()),
            root,
            timeout: DEFAULT_TIMEOUT,
            unauthorized: UnauthorizedPolicy::default(),
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Choose what a `401` does to the stored credential.
    #[must_use]
    pub fn with_unauthorized_policy(mut self, policy: UnauthorizedPolicy) -> Self {
        self.unauthorized = policy;
        self
    }

    /// Root backend address all sub-services hang off.
    #[must_use]
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured `401` handling.
    #[must_use]
    pub fn unauthorized_policy(&self) -> UnauthorizedPolicy {
        self.unauthorized
    }

    /// Base address of `sub_service`.
    #[must_use]
    pub fn base_url(&self, sub_service: SubService) -> &Url {
        match sub_service {
            SubService::Yoga => &self.yoga,
            SubService::Store => &self.store,
            SubService::Users => &self.users,
        }
    }

    /// Full URL of `segments` below a sub-service; each segment is percent-encoded.
    #[must_use]
    pub fn endpoint<S: AsRef<str>>(&self, sub_service: SubService, segments: &[S]) -> Url {
        join(self.base_url(sub_service), segments)
    }
}

fn join<S: AsRef<str>>(base: &Url, segments: &[S]) -> Url {
    let mut url = base.clone();

    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty()
            .extend(segments.iter().map(AsRef::as_ref));
    }

    url
}
