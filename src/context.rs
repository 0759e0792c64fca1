//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api::{ApiClient, ApiConfig, ApiError, ApiErrorKind, ConfigError},
    guard::{GuardState, RouteGuard},
    resources::{
        instructors::{HttpInstructorsService, InstructorsService},
        store::{HttpStoreService, StoreService},
        users::{HttpUsersService, UsersService, models::LoginRequest},
    },
    session::{Clock, CredentialStorage, TokenStore},
};

/// Failure to assemble the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build the api client")]
    Client(#[source] ConfigError),
}

/// Session-wide state shared by every view: one token store, one client and
/// one service per backend sub-service.
#[derive(Clone)]
pub struct AppContext {
    pub tokens: TokenStore,
    pub client: ApiClient,
    pub guard: RouteGuard,
    pub users: Arc<dyn UsersService>,
    pub instructors: Arc<dyn InstructorsService>,
    pub store: Arc<dyn StoreService>,
}

impl AppContext {
    /// Build application context over the given credential storage.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(
        config: ApiConfig,
        storage: Arc<dyn CredentialStorage>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppInitError> {
        let tokens = TokenStore::new(storage, clock);
        let client = ApiClient::new(config, tokens.clone()).map_err(AppInitError::Client)?;

        Ok(Self {
            guard: RouteGuard::new(tokens.clone()),
            users: Arc::new(HttpUsersService::new(client.clone())),
            instructors: Arc::new(HttpInstructorsService::new(client.clone())),
            store: Arc::new(HttpStoreService::new(client.clone())),
            tokens,
            client,
        })
    }

    /// Exchange admin credentials for a token and store it.
    ///
    /// # Errors
    ///
    /// Returns the login failure; nothing is stored in that case. Also fails
    /// when the issued token could not be saved, since the guard stays locked.
    pub async fn login(&self, email: &str, password: &str) -> Result<GuardState, ApiError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let credential = self.users.login(&request).await?;

        self.tokens.set_token(credential.expose());

        let state = self.guard.state();

        if state != GuardState::Unlocked {
            warn!(email = %request.email, "login accepted but the session was not saved");

            return Err(ApiError::new(
                ApiErrorKind::Session,
                None,
                "could not save the session",
            ));
        }

        info!(email = %request.email, "admin signed in");

        Ok(state)
    }

    /// Tear down the session. The next guard evaluation locks.
    pub fn logout(&self) -> GuardState {
        self.tokens.clear_token();

        info!("admin signed out");

        self.guard.state()
    }
}
