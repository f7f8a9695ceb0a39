//! Query navigation - one search per query-bearing navigation
//!
//! [`QueryNavigator`] is the pure state machine deciding when a search runs;
//! [`QueryNavigationService`] drives it against a [`SearchPort`] and is what
//! makes two overlapping `handle_search("x")` calls cost one request.

use std::{fmt, sync::Arc};

use domain::{
    QueryExecutionState, QueryOutcome, QueryTicket, SEARCH_FAILED_MESSAGE, SearchQuery,
    SearchResult, SessionState,
};
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};
use url::{Url, form_urlencoded};

use crate::{error::ApplicationError, ports::SearchPort};

/// Path of the query-bearing route
pub const SEARCH_PATH: &str = "/search";

/// Client location, reduced to what the state machine cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The search route and its raw `q` parameter
    Search { query: Option<String> },
    /// Any other path
    Other(String),
}

impl Route {
    /// Classify an absolute location
    pub fn from_url(location: &Url) -> Self {
        if location.path() == SEARCH_PATH {
            let query = location
                .query_pairs()
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value.into_owned());
            Self::Search { query }
        } else {
            Self::Other(location.path().to_string())
        }
    }

    /// The trimmed, non-blank query this route carries
    pub fn search_query(&self) -> Option<&str> {
        match self {
            Self::Search { query: Some(q) } => Some(q.trim()).filter(|q| !q.is_empty()),
            _ => None,
        }
    }

    /// True for the search route without a usable `q`
    pub fn lacks_query(&self) -> bool {
        matches!(self, Self::Search { .. }) && self.search_query().is_none()
    }

    /// Location of the search route carrying `query`
    pub fn search_target(query: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{SEARCH_PATH}?q={encoded}")
    }
}

/// What a form submission should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    /// Navigate to this location; the search runs when the route is observed
    Navigate(String),
    /// The route already carries this query
    Unchanged,
    /// Blank input
    Ignored,
}

/// Pure query state machine
#[derive(Debug, Clone, Default)]
pub struct QueryNavigator {
    state: QueryExecutionState,
}

impl QueryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> &QueryExecutionState {
        &self.state
    }

    /// React to the current route
    ///
    /// Waits until the session pass has loaded. Leaving the search route
    /// resets the guard; a new `q` supersedes the previous one.
    pub fn observe_route(&mut self, route: &Route, session: &SessionState) -> Option<QueryTicket> {
        if !session.is_loaded() {
            return None;
        }

        match route.search_query() {
            Some(query) => {
                self.state.set_query(query);
                self.state.begin(query)
            },
            None => {
                if self.state.last_executed_query().is_some() {
                    self.state.reset();
                }
                None
            },
        }
    }

    /// Ask to execute `query` directly
    pub fn request(&mut self, query: &str) -> Option<QueryTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.state.begin(query)
    }

    /// Decide what submitting `text` from `route` does
    pub fn submit(&mut self, text: &str, route: &Route) -> SubmitAction {
        let text = text.trim();
        if text.is_empty() {
            return SubmitAction::Ignored;
        }
        self.state.set_query(text);

        if route.search_query() == Some(text) {
            SubmitAction::Unchanged
        } else {
            SubmitAction::Navigate(Route::search_target(text))
        }
    }

    /// Apply a response; returns `false` if it was stale and discarded
    pub fn complete(
        &mut self,
        ticket: &QueryTicket,
        result: Result<Vec<SearchResult>, ApplicationError>,
    ) -> bool {
        let outcome = match result {
            Ok(results) => QueryOutcome::Results(results),
            Err(_) => QueryOutcome::Failed(SEARCH_FAILED_MESSAGE.to_string()),
        };
        self.state.settle(ticket, outcome)
    }
}

/// What happened to a search trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing to run, or a duplicate of the current query
    Suppressed,
    /// Ran and the outcome was applied
    Applied,
    /// Ran but a newer navigation had superseded it
    Discarded,
    /// The search route carried no query; the client belongs on `/`
    RedirectHome,
}

/// Drives a [`QueryNavigator`] against a search backend
pub struct QueryNavigationService {
    search: Arc<dyn SearchPort>,
    navigator: Mutex<QueryNavigator>,
}

impl fmt::Debug for QueryNavigationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryNavigationService")
            .field("navigator", &*self.navigator.lock())
            .finish_non_exhaustive()
    }
}

impl QueryNavigationService {
    pub fn new(search: Arc<dyn SearchPort>) -> Self {
        Self {
            search,
            navigator: Mutex::new(QueryNavigator::new()),
        }
    }

    /// Snapshot of the view state
    pub fn snapshot(&self) -> QueryExecutionState {
        self.navigator.lock().state().clone()
    }

    /// Observe a route and run the search it calls for, if any
    pub async fn observe(&self, route: &Route, session: &SessionState) -> Dispatch {
        let ticket = self.navigator.lock().observe_route(route, session);
        if ticket.is_none() && session.is_loaded() && route.lacks_query() {
            debug!("Search route without a query, redirecting home");
            return Dispatch::RedirectHome;
        }
        self.dispatch(ticket).await
    }

    /// Execute `query` unless it is already pending or shown
    pub async fn handle_search(&self, query: &str) -> Dispatch {
        let ticket = self.navigator.lock().request(query);
        self.dispatch(ticket).await
    }

    /// Decide what a form submission does; never executes by itself
    pub fn submit(&self, text: &str, route: &Route) -> SubmitAction {
        self.navigator.lock().submit(text, route)
    }

    async fn dispatch(&self, ticket: Option<QueryTicket>) -> Dispatch {
        match ticket {
            Some(ticket) => self.execute(ticket).await,
            None => Dispatch::Suppressed,
        }
    }

    #[instrument(skip(self), fields(query = %ticket.query))]
    async fn execute(&self, ticket: QueryTicket) -> Dispatch {
        let result = match SearchQuery::parse(&ticket.query) {
            Ok(query) => self.search.search(&query).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = &result {
            warn!(error = %e, "Search request failed");
        }

        if self.navigator.lock().complete(&ticket, result) {
            Dispatch::Applied
        } else {
            debug!("Discarding stale search response");
            Dispatch::Discarded
        }
    }
}
