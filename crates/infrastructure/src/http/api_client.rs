//! Client for the LeetSniff HTTP boundary
//!
//! Used by the client driver: it is the [`SearchPort`] behind the query
//! state machine and the [`SessionGatewayPort`] behind the session
//! reconciler. Session cookies are kept in a shared jar, and every request
//! carries an `X-Request-Id` header so server logs can be correlated.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{SearchPort, SessionGatewayPort},
};
use async_trait::async_trait;
use domain::{DomainError, SearchQuery, SearchResult, UserIdentity};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, cookie::Jar};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;

/// Header name for request correlation ID
pub const X_REQUEST_ID: &str = "x-request-id";

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    user: UserIdentity,
}

/// HTTP client for the server's search and auth routes
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    /// Create a client for `config.api_base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to initialize.
    pub fn new(config: &ClientConfig) -> Result<Self, ApplicationError> {
        let mut base = Url::parse(&config.api_base_url)
            .map_err(|e| ApplicationError::Configuration(format!("api_base_url: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("LeetSniff/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self { client, base, jar })
    }

    /// Attach an existing server session
    #[must_use]
    pub fn with_session_cookie(self, name: &str, value: &str) -> Self {
        self.jar.add_cookie_str(&format!("{name}={value}; Path=/"), &self.base);
        self
    }

    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApplicationError> {
        self.base
            .join(path)
            .map_err(|e| ApplicationError::Internal(e.to_string()))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request_id = Uuid::new_v4();
        debug!(%request_id, %url, "Calling server");
        self.client
            .request(method, url)
            .header(X_REQUEST_ID, request_id.to_string())
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApplicationError> {
        request
            .send()
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))
    }

    async fn unexpected(response: Response) -> ApplicationError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        ApplicationError::ExternalService(format!("HTTP {status}: {message}"))
    }

    /// Server liveness
    pub async fn health(&self) -> Result<HealthStatus, ApplicationError> {
        let response = Self::send(self.request(Method::GET, self.endpoint("health")?)).await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))
    }
}

#[async_trait]
impl SearchPort for ApiClient {
    #[instrument(skip(self, query), fields(query = %query))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ApplicationError> {
        let request = self
            .request(Method::GET, self.endpoint("search")?)
            .query(&[("q", query.as_str())]);
        let response = Self::send(request).await?;

        match response.status() {
            status if status.is_success() => response
                .json()
                .await
                .map_err(|e| ApplicationError::ExternalService(e.to_string())),
            StatusCode::BAD_REQUEST => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .map(|body| body.error)
                    .unwrap_or_else(|_| "Invalid query".to_string());
                Err(DomainError::InvalidQuery(message).into())
            },
            _ => Err(Self::unexpected(response).await),
        }
    }
}

#[async_trait]
impl SessionGatewayPort for ApiClient {
    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<Option<UserIdentity>, ApplicationError> {
        let response = Self::send(self.request(Method::GET, self.endpoint("auth/user")?)).await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Ok(None),
            status if status.is_success() => {
                let body: UserBody = response
                    .json()
                    .await
                    .map_err(|e| ApplicationError::ExternalService(e.to_string()))?;
                Ok(Some(body.user))
            },
            _ => Err(Self::unexpected(response).await),
        }
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), ApplicationError> {
        let response =
            Self::send(self.request(Method::POST, self.endpoint("auth/logout")?)).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let err = Self::unexpected(response).await;
            warn!(error = %err, "Server logout failed");
            Err(err)
        }
    }
}
