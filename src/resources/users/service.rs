//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError, ApiErrorKind, SubService},
    resources::users::models::{LoginRequest, LoginResponse, User},
    session::Credential,
};

/// Users service over the users sub-service.
#[derive(Debug, Clone)]
pub struct HttpUsersService {
    client: ApiClient,
}

impl HttpUsersService {
    /// Service issuing calls through `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsersService for HttpUsersService {
    async fn login(&self, request: &LoginRequest) -> Result<Credential, ApiError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(ApiError::validation("Email and password are required"));
        }

        let response: LoginResponse = self
            .client
            .post(SubService::Users, &["admin", "login"], request)
            .await?;

        response
            .token
            .filter(|token| !token.is_empty())
            .map(Credential::new)
            .ok_or_else(|| {
                ApiError::new(
                    ApiErrorKind::UnexpectedPayload,
                    Some(200),
                    "login response did not include a token",
                )
            })
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.client.get(SubService::Users, &["allusers"]).await
    }
}

/// Admin login and registered users.
#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Exchanges admin credentials for a bearer token. Does not store it.
    async fn login(&self, request: &LoginRequest) -> Result<Credential, ApiError>;

    /// Retrieves every registered user.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
}
