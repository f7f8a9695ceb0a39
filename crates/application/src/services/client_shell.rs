//! Client shell - one navigation, end to end
//!
//! Reconciles the session first, then lets the query navigator observe the
//! route with the reconciled state.

use std::fmt;

use domain::{AuthStatus, QueryExecutionState, SessionState};
use tracing::{debug, instrument};
use url::Url;

use super::{
    query_navigation::{Dispatch, QueryNavigationService, Route, SubmitAction},
    session_reconciler::{ReconcileOutcome, SessionReconciler},
};
use crate::error::ApplicationError;

/// Everything one navigation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationReport {
    /// Location that was processed
    pub location: Url,
    pub reconcile: ReconcileOutcome,
    pub dispatch: Dispatch,
}

/// Client-side composition of session and query state
pub struct ClientShell {
    reconciler: SessionReconciler,
    navigation: QueryNavigationService,
}

impl fmt::Debug for ClientShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientShell")
            .field("reconciler", &self.reconciler)
            .field("navigation", &self.navigation)
            .finish()
    }
}

impl ClientShell {
    pub const fn new(reconciler: SessionReconciler, navigation: QueryNavigationService) -> Self {
        Self {
            reconciler,
            navigation,
        }
    }

    pub const fn session(&self) -> &SessionState {
        self.reconciler.state()
    }

    pub fn query_state(&self) -> QueryExecutionState {
        self.navigation.snapshot()
    }

    /// Consume the transient auth status
    pub fn take_auth_status(&mut self) -> Option<AuthStatus> {
        self.reconciler.take_auth_status()
    }

    /// Process a navigation to `location`
    ///
    /// A search route without a query lands on `/`; the report then carries
    /// that location.
    #[instrument(skip(self, location), fields(location = %location))]
    pub async fn navigate(&mut self, location: &Url) -> NavigationReport {
        let reconcile = self.reconciler.on_navigation(location).await;
        let route = Route::from_url(location);
        let dispatch = self.navigation.observe(&route, self.reconciler.state()).await;

        let location = if dispatch == Dispatch::RedirectHome {
            home_of(location)
        } else {
            location.clone()
        };

        NavigationReport {
            location,
            reconcile,
            dispatch,
        }
    }

    /// Submit the search form while at `current`
    ///
    /// Returns `None` when the submission changes nothing.
    pub async fn submit(
        &mut self,
        text: &str,
        current: &Url,
    ) -> Result<Option<NavigationReport>, ApplicationError> {
        match self.navigation.submit(text, &Route::from_url(current)) {
            SubmitAction::Navigate(target) => {
                let next = current
                    .join(&target)
                    .map_err(|e| ApplicationError::Internal(e.to_string()))?;
                Ok(Some(self.navigate(&next).await))
            },
            action => {
                debug!(?action, "Submission needs no navigation");
                Ok(None)
            },
        }
    }

    /// Sign out
    pub async fn logout(&mut self) {
        self.reconciler.logout().await;
    }
}

fn home_of(location: &Url) -> Url {
    let mut home = location.clone();
    home.set_path("/");
    home.set_query(None);
    home.set_fragment(None);
    home
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use domain::{GitHubExtensions, ProviderExtensions, SearchResult, UserIdentity};

    use super::*;
    use crate::{
        ports::{MockIdentityCachePort, MockSearchPort, MockSessionGatewayPort},
        services::session_reconciler::IdentitySource,
    };

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

    fn shell(search: MockSearchPort) -> ClientShell {
        let mut cache = MockIdentityCachePort::new();
        cache.expect_load().returning(|| Ok(None));
        cache.expect_store().returning(|_| Ok(()));
        cache.expect_clear().returning(|| Ok(()));
        let mut gateway = MockSessionGatewayPort::new();
        gateway.expect_current_user().returning(|| Ok(None));
        gateway.expect_logout().returning(|| Ok(()));

        ClientShell::new(
            SessionReconciler::new(Arc::new(cache), Arc::new(gateway)),
            QueryNavigationService::new(Arc::new(search)),
        )
    }

    #[tokio::test]
    async fn navigation_to_search_route_runs_once() {
        let mut search = MockSearchPort::new();
        search.expect_search().times(1).returning(|_| {
            Ok(vec![SearchResult::normalized(
                Some("Rust"),
                Some("https://rust-lang.org"),
                None,
            )])
        });
        let mut shell = shell(search);
        let url = Url::parse("http://localhost:3000/search?q=rust").unwrap();

        assert_eq!(shell.navigate(&url).await.dispatch, Dispatch::Applied);
        assert_eq!(shell.navigate(&url).await.dispatch, Dispatch::Suppressed);
        assert_eq!(shell.query_state().results().len(), 1);
        assert!(shell.session().is_loaded());
    }

    #[tokio::test]
    async fn submit_from_home_navigates_then_searches() {
        let mut search = MockSearchPort::new();
        search
            .expect_search()
            .withf(|q| q.as_str() == "rust book")
            .times(1)
            .returning(|_| Ok(vec![]));
        let mut shell = shell(search);
        let home = Url::parse("http://localhost:3000/").unwrap();

        let report = shell.submit("rust book", &home).await.unwrap().unwrap();
        assert_eq!(report.location.path(), "/search");
        assert_eq!(report.dispatch, Dispatch::Applied);

        let again = shell.submit("rust book", &report.location).await.unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn bare_search_route_lands_home() {
        let mut search = MockSearchPort::new();
        search.expect_search().never();
        let mut shell = shell(search);
        let url = Url::parse("http://localhost:3000/search?page=2#top").unwrap();

        let report = shell.navigate(&url).await;

        assert_eq!(report.dispatch, Dispatch::RedirectHome);
        assert_eq!(report.location.as_str(), "http://localhost:3000/");
        assert!(shell.query_state().last_executed_query().is_none());
    }

    #[tokio::test]
    async fn auth_redirect_signs_in_before_search() {
        let mut search = MockSearchPort::new();
        search.expect_search().never();
        let mut shell = shell(search);

        let mut url = Url::parse("http://localhost:3000/").unwrap();
        url.query_pairs_mut()
            .append_pair("auth", "success")
            .append_pair("user", &user().to_json().unwrap());

        let report = shell.navigate(&url).await;
        assert_eq!(report.reconcile.source, Some(IdentitySource::Url));
        assert_eq!(report.dispatch, Dispatch::Suppressed);
        assert_eq!(shell.take_auth_status(), Some(AuthStatus::Success));

        shell.logout().await;
        assert!(!shell.session().is_authenticated());
    }
}
