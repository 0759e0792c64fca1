//! Authenticated HTTP client for the studio backend.

use std::sync::Arc;

use reqwest::{Client, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api::{
        ApiConfig, ApiError, ApiErrorKind, AuthenticatedRequest, ConfigError, Method, SubService,
        UnauthorizedPolicy,
    },
    session::TokenStore,
};

/// Issues requests to the backend sub-services, attaching the stored credential.
///
/// Holds no mutable state besides its configuration; clone it freely.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Arc<ApiConfig>,
    tokens: TokenStore,
    http: Client,
}

impl ApiClient {
    /// Create a client over `tokens`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig, tokens: TokenStore) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            config: Arc::new(config),
            tokens,
            http,
        })
    }

    /// Backend addresses and request settings.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Token store read for every request.
    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Describe a call, reading the current credential. Never blocks for a
    /// missing credential; the backend decides whether to reject.
    #[must_use]
    pub fn prepare<S: AsRef<str>>(
        &self,
        sub_service: SubService,
        method: Method,
        segments: &[S],
        body: Option<Value>,
    ) -> AuthenticatedRequest {
        AuthenticatedRequest {
            sub_service,
            method,
            segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
            body,
            credential: self.tokens.get_token().filter(|token| !token.is_empty()),
        }
    }

    /// List or read a resource.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or a body
    /// that does not match `T`.
    pub async fn get<T, S>(&self, sub_service: SubService, segments: &[S]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        self.send(self.prepare(sub_service, Method::Get, segments, None))
            .await
    }

    /// Create, or update by action.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post<B, T, S>(
        &self,
        sub_service: SubService,
        segments: &[S],
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        let body = encode_body(body)?;

        self.send(self.prepare(sub_service, Method::Post, segments, Some(body)))
            .await
    }

    /// Update by id.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn put<B, T, S>(
        &self,
        sub_service: SubService,
        segments: &[S],
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        let body = encode_body(body)?;

        self.send(self.prepare(sub_service, Method::Put, segments, Some(body)))
            .await
    }

    /// Remove by id.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn delete<T, S>(
        &self,
        sub_service: SubService,
        segments: &[S],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        self.send(self.prepare(sub_service, Method::Delete, segments, None))
            .await
    }

    /// Dispatch a prepared request and decode its body as `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: AuthenticatedRequest,
    ) -> Result<T, ApiError> {
        let url = self
            .config
            .endpoint(request.sub_service, &request.segments);

        debug!(
            method = %request.method,
            sub_service = request.sub_service.name(),
            path = %request.path(),
            authenticated = request.has_credential(),
            "dispatching api request"
        );

        let mut builder = self.http.request(request.method.into(), url);

        if let Some(authorization) = request.authorization() {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| {
            warn!(path = %request.path(), "api request failed: {source}");

            ApiError::transport(&source)
        })?;

        let status = response.status();

        let text = response.text().await.map_err(|source| {
            warn!(path = %request.path(), "failed to read api response: {source}");

            ApiError::transport(&source)
        })?;

        if !status.is_success() {
            let error = ApiError::from_status(status.as_u16(), &text);

            warn!(
                path = %request.path(),
                status = status.as_u16(),
                "api request rejected: {error}"
            );

            self.on_failure(&error);

            return Err(error);
        }

        decode_body(status.as_u16(), &text)
    }

    fn on_failure(&self, error: &ApiError) {
        if error.status() == Some(401)
            && self.config.unauthorized_policy() == UnauthorizedPolicy::ClearSession
        {
            debug!("clearing credential after 401 response");

            self.tokens.clear_token();
        }
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|source| {
        ApiError::new(
            ApiErrorKind::Validation,
            None,
            format!("failed to encode request body: {source}"),
        )
    })
}

fn decode_body<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, ApiError> {
    let parsed = if text.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(text)
    };

    parsed.map_err(|source| {
        warn!("api response did not match the expected schema: {source}");

        ApiError::unexpected_payload(status, text)
    })
}
