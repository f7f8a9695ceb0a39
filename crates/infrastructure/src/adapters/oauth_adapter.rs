//! OAuth adapter - Implements OAuthExchangePort over HTTP
//!
//! Runs the authorization-code grant against GitHub or Google, fetches the
//! profile with the resulting access token, and hands it to
//! `integration_identity` for normalization. The access token is never
//! stored or logged.

use application::{error::ApplicationError, ports::OAuthExchangePort};
use async_trait::async_trait;
use domain::{DomainError, IdentityProvider, UserIdentity};
use integration_identity::{
    GitHubEmailEntry, GitHubProfile, GoogleProfile, ProviderProfile, normalize_identity,
};
use reqwest::{Client, header::ACCEPT};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::{OAuthConfig, OAuthProviderConfig};

/// Public endpoints of an identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub authorize_url: &'static str,
    pub token_url: &'static str,
    pub profile_url: &'static str,
    pub emails_url: Option<&'static str>,
    pub scopes: &'static [&'static str],
}

impl ProviderEndpoints {
    pub const GITHUB: Self = Self {
        authorize_url: "https://github.com/login/oauth/authorize",
        token_url: "https://github.com/login/oauth/access_token",
        profile_url: "https://api.github.com/user",
        emails_url: Some("https://api.github.com/user/emails"),
        scopes: &["user:email"],
    };

    pub const GOOGLE: Self = Self {
        authorize_url: "https://accounts.google.com/o/oauth2/v2/auth",
        token_url: "https://oauth2.googleapis.com/token",
        profile_url: "https://www.googleapis.com/oauth2/v2/userinfo",
        emails_url: None,
        scopes: &["profile", "email"],
    };

    #[must_use]
    pub const fn for_provider(provider: IdentityProvider) -> Self {
        match provider {
            IdentityProvider::Github => Self::GITHUB,
            IdentityProvider::Google => Self::GOOGLE,
        }
    }
}

/// Endpoints and credentials after applying config overrides
struct ResolvedClient<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    callback_url: String,
    authorize_url: &'a str,
    token_url: &'a str,
    profile_url: &'a str,
    emails_url: Option<&'a str>,
    scope: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// OAuth code exchange over HTTP
pub struct HttpOAuthAdapter {
    client: Client,
    config: OAuthConfig,
    public_url: String,
}

impl std::fmt::Debug for HttpOAuthAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOAuthAdapter")
            .field("providers", &self.config.configured_providers())
            .field("public_url", &self.public_url)
            .finish_non_exhaustive()
    }
}

impl HttpOAuthAdapter {
    /// Create an adapter; `public_url` is this server's externally
    /// reachable base, used for default callback URLs
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: OAuthConfig, public_url: impl Into<String>) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("LeetSniff/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            config,
            public_url: public_url.into(),
        })
    }

    fn resolve(&self, provider: IdentityProvider) -> Result<ResolvedClient<'_>, ApplicationError> {
        let settings: &OAuthProviderConfig = self.config.provider(provider);
        let (Some(client_id), Some(client_secret)) =
            (settings.client_id.as_deref(), settings.client_secret.as_ref())
        else {
            return Err(ApplicationError::Configuration(format!(
                "{provider} sign-in is not configured"
            )));
        };

        let defaults = ProviderEndpoints::for_provider(provider);
        let scope = if settings.scopes.is_empty() {
            defaults.scopes.join(" ")
        } else {
            settings.scopes.join(" ")
        };

        Ok(ResolvedClient {
            client_id,
            client_secret: client_secret.expose_secret(),
            callback_url: settings.callback_url.clone().unwrap_or_else(|| {
                format!(
                    "{}/auth/{provider}/callback",
                    self.public_url.trim_end_matches('/')
                )
            }),
            authorize_url: settings.authorize_url.as_deref().unwrap_or(defaults.authorize_url),
            token_url: settings.token_url.as_deref().unwrap_or(defaults.token_url),
            profile_url: settings.profile_url.as_deref().unwrap_or(defaults.profile_url),
            emails_url: settings.emails_url.as_deref().or(defaults.emails_url),
            scope,
        })
    }

    async fn access_token(
        &self,
        provider: IdentityProvider,
        resolved: &ResolvedClient<'_>,
        code: &str,
    ) -> Result<String, ApplicationError> {
        let form = [
            ("client_id", resolved.client_id),
            ("client_secret", resolved.client_secret),
            ("code", code),
            ("redirect_uri", resolved.callback_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .client
            .post(resolved.token_url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("{provider} token request: {e}")))?;

        let status = response.status();
        let body: TokenResponse = response.json().await.map_err(|e| {
            ApplicationError::ExternalService(format!("{provider} token response: {e}"))
        })?;

        match body {
            TokenResponse {
                access_token: Some(token),
                ..
            } if status.is_success() && !token.is_empty() => Ok(token),
            TokenResponse {
                error,
                error_description,
                ..
            } => {
                let reason = error_description
                    .or(error)
                    .unwrap_or_else(|| format!("HTTP {status}"));
                Err(ApplicationError::ExternalService(format!(
                    "{provider} rejected the authorization code: {reason}"
                )))
            },
        }
    }

    async fn get_json(&self, url: &str, token: &str) -> Result<Value, ApplicationError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::ExternalService(format!(
                "profile request failed: HTTP {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))
    }

    async fn github_profile(
        &self,
        resolved: &ResolvedClient<'_>,
        token: &str,
    ) -> Result<ProviderProfile, ApplicationError> {
        let user = self.get_json(resolved.profile_url, token).await?;

        let emails = match resolved.emails_url {
            Some(url) => match self.get_json(url, token).await {
                Ok(listing) => serde_json::from_value::<Vec<GitHubEmailEntry>>(listing)
                    .inspect_err(|e| debug!(error = %e, "Ignoring unreadable email listing"))
                    .ok(),
                Err(e) => {
                    debug!(error = %e, "Email listing unavailable");
                    None
                },
            },
            None => None,
        };

        let profile = GitHubProfile::from_api(user, emails).map_err(DomainError::from)?;
        Ok(ProviderProfile::GitHub(profile))
    }

    async fn google_profile(
        &self,
        resolved: &ResolvedClient<'_>,
        token: &str,
    ) -> Result<ProviderProfile, ApplicationError> {
        let userinfo = self.get_json(resolved.profile_url, token).await?;
        let profile = GoogleProfile::from_userinfo(userinfo).map_err(DomainError::from)?;
        Ok(ProviderProfile::Google(profile))
    }
}

#[async_trait]
impl OAuthExchangePort for HttpOAuthAdapter {
    fn authorization_url(
        &self,
        provider: IdentityProvider,
        state: &str,
    ) -> Result<String, ApplicationError> {
        let resolved = self.resolve(provider)?;
        let url = Url::parse_with_params(
            resolved.authorize_url,
            [
                ("client_id", resolved.client_id),
                ("redirect_uri", resolved.callback_url.as_str()),
                ("response_type", "code"),
                ("scope", resolved.scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| ApplicationError::Configuration(format!("{provider} authorize_url: {e}")))?;
        Ok(url.into())
    }

    #[instrument(skip(self, code), fields(provider = %provider))]
    async fn exchange(
        &self,
        provider: IdentityProvider,
        code: &str,
    ) -> Result<UserIdentity, ApplicationError> {
        let resolved = self.resolve(provider)?;
        let token = self.access_token(provider, &resolved, code).await?;

        let profile = match provider {
            IdentityProvider::Github => self.github_profile(&resolved, &token).await?,
            IdentityProvider::Google => self.google_profile(&resolved, &token).await?,
        };

        let identity = normalize_identity(&profile).map_err(|e| {
            warn!(error = %e, "Provider profile rejected");
            DomainError::from(e)
        })?;
        info!(login = %identity.login, "Provider profile normalized");
        Ok(identity)
    }
}
