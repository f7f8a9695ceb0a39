//! Search query value object
//!
//! A query is accepted only when it is non-empty after trimming. Everything
//! downstream of the HTTP boundary receives a [`SearchQuery`], never a raw
//! string, so the non-empty invariant is checked exactly once.
//!
//! # Examples
//!
//! ```
//! use domain::SearchQuery;
//!
//! let query = SearchQuery::parse("  rust async  ").unwrap();
//! assert_eq!(query.as_str(), "rust async");
//!
//! assert!(SearchQuery::parse("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A trimmed, non-empty search query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Parse a raw query string
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidQuery`] if the input is blank.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the query as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SearchQuery {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for SearchQuery {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SearchQuery> for String {
    fn from(query: SearchQuery) -> Self {
        query.0
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed() {
        let query = SearchQuery::parse("  hello world \n").unwrap();
        assert_eq!(query.as_str(), "hello world");
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(matches!(
            SearchQuery::parse(""),
            Err(DomainError::InvalidQuery(_))
        ));
    }

    #[test]
    fn whitespace_only_query_is_rejected() {
        assert!(SearchQuery::parse(" \t\n ").is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: SearchQuery = serde_json::from_str("\" tokio \"").unwrap();
        assert_eq!(ok.as_str(), "tokio");

        let err = serde_json::from_str::<SearchQuery>("\"   \"");
        assert!(err.is_err());
    }

    #[test]
    fn display_is_the_trimmed_query() {
        let query = SearchQuery::parse(" axum ").unwrap();
        assert_eq!(query.to_string(), "axum");
    }
}
