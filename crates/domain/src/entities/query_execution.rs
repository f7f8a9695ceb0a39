//! Client-side query execution state
//!
//! Tracks a single search view: the query text, which query last executed,
//! and whether a request is outstanding. Each execution is identified by a
//! [`QueryTicket`]; a response carrying an outdated ticket is discarded.

use super::SearchResult;

/// User-visible error when a search request fails
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch results. Please try again.";

/// Identifies one issued search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub query: String,
    pub generation: u64,
}

/// How a settled query ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Results(Vec<SearchResult>),
    Failed(String),
}

/// Where the view is in its request lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Pending {
        query: String,
    },
    Settled {
        query: String,
        outcome: QueryOutcome,
    },
}

/// State of the search view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryExecutionState {
    query: String,
    last_executed_query: Option<String>,
    phase: QueryPhase,
    generation: u64,
}

impl QueryExecutionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Query the duplicate guard currently holds
    pub fn last_executed_query(&self) -> Option<&str> {
        self.last_executed_query.as_deref()
    }

    pub const fn phase(&self) -> &QueryPhase {
        &self.phase
    }

    /// True only while exactly one request for the current query is outstanding
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, QueryPhase::Pending { .. })
    }

    /// Results of the settled query, empty otherwise
    pub fn results(&self) -> &[SearchResult] {
        match &self.phase {
            QueryPhase::Settled {
                outcome: QueryOutcome::Results(results),
                ..
            } => results,
            _ => &[],
        }
    }

    /// Error of the settled query, if it failed
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            QueryPhase::Settled {
                outcome: QueryOutcome::Failed(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Update the query text without executing anything
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Whether `query` may execute now
    ///
    /// False when the guard already holds the same value, which covers both
    /// an outstanding and a settled request for that exact string.
    pub fn can_execute(&self, query: &str) -> bool {
        self.last_executed_query.as_deref() != Some(query)
    }

    /// Start executing `query`, returning the ticket its response must carry
    ///
    /// Returns `None` when the duplicate guard rejects it.
    pub fn begin(&mut self, query: &str) -> Option<QueryTicket> {
        if !self.can_execute(query) {
            return None;
        }

        self.generation = self.generation.wrapping_add(1);
        self.query = query.to_string();
        self.last_executed_query = Some(query.to_string());
        self.phase = QueryPhase::Pending {
            query: query.to_string(),
        };

        Some(QueryTicket {
            query: query.to_string(),
            generation: self.generation,
        })
    }

    /// Apply a response; returns `false` if the ticket is stale and the
    /// response was discarded
    pub fn settle(&mut self, ticket: &QueryTicket, outcome: QueryOutcome) -> bool {
        let current = matches!(
            &self.phase,
            QueryPhase::Pending { query } if *query == ticket.query
        ) && ticket.generation == self.generation;

        if current {
            self.phase = QueryPhase::Settled {
                query: ticket.query.clone(),
                outcome,
            };
        }
        current
    }

    /// Forget the executed query so the next distinct navigation can run
    ///
    /// Any outstanding ticket becomes stale.
    pub fn reset(&mut self) {
        self.last_executed_query = None;
        self.phase = QueryPhase::Idle;
        self.generation = self.generation.wrapping_add(1);
    }
}
