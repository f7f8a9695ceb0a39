//! Auth service - server side of the OAuth round trip and sessions

use std::{fmt, sync::Arc};

use domain::{DomainError, IdentityProvider, UserIdentity};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApplicationError,
    ports::{OAuthExchangePort, SessionStorePort},
};

/// Where to send the browser to start a sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub url: String,
    /// Anti-forgery value the callback must echo back
    pub state: String,
}

/// A freshly created session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub session_id: String,
    pub user: UserIdentity,
}

/// Service for provider sign-in and session lookups
pub struct AuthService {
    oauth: Arc<dyn OAuthExchangePort>,
    sessions: Arc<dyn SessionStorePort>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(oauth: Arc<dyn OAuthExchangePort>, sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { oauth, sessions }
    }

    /// Start a sign-in with `provider`
    pub fn begin_login(&self, provider: IdentityProvider) -> Result<LoginRedirect, ApplicationError> {
        let state = Uuid::new_v4().simple().to_string();
        let url = self.oauth.authorization_url(provider, &state)?;
        Ok(LoginRedirect { url, state })
    }

    /// Finish a sign-in: exchange the code, normalize, open a session
    #[instrument(skip(self, code), fields(provider = %provider))]
    pub async fn complete_login(
        &self,
        provider: IdentityProvider,
        code: &str,
    ) -> Result<AuthenticatedSession, ApplicationError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(DomainError::ValidationError("missing authorization code".to_string()).into());
        }

        let user = self.oauth.exchange(provider, code).await.inspect_err(|e| {
            warn!(error = %e, "Provider sign-in failed");
        })?;

        let session_id = self.sessions.create(&user).await?;
        info!(login = %user.login, "Session created");

        Ok(AuthenticatedSession { session_id, user })
    }

    /// User of the session, if it is still live
    pub async fn current_user(
        &self,
        session_id: Option<&str>,
    ) -> Result<Option<UserIdentity>, ApplicationError> {
        match session_id {
            Some(id) => self.sessions.get(id).await,
            None => Ok(None),
        }
    }

    /// User of the session, or [`ApplicationError::NotAuthenticated`]
    pub async fn require_user(&self, session_id: Option<&str>) -> Result<UserIdentity, ApplicationError> {
        self.current_user(session_id)
            .await?
            .ok_or(ApplicationError::NotAuthenticated)
    }

    /// Destroy the session, if any
    #[instrument(skip(self, session_id))]
    pub async fn logout(&self, session_id: Option<&str>) -> Result<(), ApplicationError> {
        if let Some(id) = session_id {
            self.sessions.destroy(id).await?;
            info!("Session destroyed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use domain::{GitHubExtensions, ProviderExtensions};
    use mockall::predicate::eq;

    use super::*;
    use crate::ports::{MockOAuthExchangePort, MockSessionStorePort};

    fn user() -> UserIdentity {
        UserIdentity {
            id: "1".to_string(),
            login: "octo".to_string(),
            name: "Octo".to_string(),
            email: None,
            avatar_url: None,
            extensions: ProviderExtensions::Github(GitHubExtensions::default()),
        }
    }

    #[test]
    fn begin_login_includes_state() {
        let mut oauth = MockOAuthExchangePort::new();
        oauth
            .expect_authorization_url()
            .returning(|_, state| Ok(format!("https://github.com/login/oauth/authorize?state={state}")));
        let service = AuthService::new(Arc::new(oauth), Arc::new(MockSessionStorePort::new()));

        let redirect = service.begin_login(IdentityProvider::Github).unwrap();
        assert!(!redirect.state.is_empty());
        assert!(redirect.url.ends_with(&redirect.state));
    }

    #[tokio::test]
    async fn complete_login_creates_session() {
        let mut oauth = MockOAuthExchangePort::new();
        oauth
            .expect_exchange()
            .with(eq(IdentityProvider::Github), eq("abc"))
            .times(1)
            .returning(|_, _| Ok(user()));
        let mut sessions = MockSessionStorePort::new();
        sessions
            .expect_create()
            .times(1)
            .returning(|_| Ok("session-1".to_string()));

        let service = AuthService::new(Arc::new(oauth), Arc::new(sessions));
        let session = service.complete_login(IdentityProvider::Github, "abc").await.unwrap();

        assert_eq!(session.session_id, "session-1");
        assert_eq!(session.user.login, "octo");
    }

    #[tokio::test]
    async fn malformed_profile_creates_no_session() {
        let mut oauth = MockOAuthExchangePort::new();
        oauth.expect_exchange().returning(|_, _| {
            Err(DomainError::malformed_profile("google", "missing email").into())
        });
        let mut sessions = MockSessionStorePort::new();
        sessions.expect_create().never();

        let service = AuthService::new(Arc::new(oauth), Arc::new(sessions));
        let err = service
            .complete_login(IdentityProvider::Google, "abc")
            .await
            .unwrap_err();
        assert!(err.is_malformed_profile());
    }

    #[tokio::test]
    async fn blank_code_is_rejected_without_exchange() {
        let mut oauth = MockOAuthExchangePort::new();
        oauth.expect_exchange().never();
        let service = AuthService::new(Arc::new(oauth), Arc::new(MockSessionStorePort::new()));

        assert!(service.complete_login(IdentityProvider::Github, " ").await.is_err());
    }

    #[tokio::test]
    async fn current_user_without_cookie_is_none() {
        let mut sessions = MockSessionStorePort::new();
        sessions.expect_get().never();
        let service = AuthService::new(Arc::new(MockOAuthExchangePort::new()), Arc::new(sessions));

        assert!(service.current_user(None).await.unwrap().is_none());
        assert!(matches!(
            service.require_user(None).await,
            Err(ApplicationError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn logout_destroys_session() {
        let mut sessions = MockSessionStorePort::new();
        sessions
            .expect_destroy()
            .with(eq("session-1"))
            .times(1)
            .returning(|_| Ok(()));
        let service = AuthService::new(Arc::new(MockOAuthExchangePort::new()), Arc::new(sessions));

        service.logout(Some("session-1")).await.unwrap();
        service.logout(None).await.unwrap();
    }
}
