//! Outbound request description.

use std::fmt;

use serde_json::Value;

use crate::{api::SubService, session::Credential};

/// HTTP verb of a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read.
    Get,
    /// Create or act.
    Post,
    /// Update by id.
    Put,
    /// Remove by id.
    Delete,
}

impl Method {
    /// Upper-case verb as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// A call ready for dispatch, with the credential captured at build time.
#[derive(Debug, Clone)]
pub struct AuthenticatedRequest {
    pub sub_service: SubService,
    pub method: Method,
    pub segments: Vec<String>,
    pub body: Option<Value>,
    pub(crate) credential: Option<Credential>,
}

impl AuthenticatedRequest {
    /// `Authorization` header value, present only when a credential was.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.credential.as_ref().map(Credential::bearer)
    }

    /// Whether a bearer header will be attached.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Resource path below the sub-service base, e.g. `/instructor/add`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .fold(String::new(), |path, segment| path + "/" + segment)
    }
}
