//! Degraded-mode results
//!
//! Built locally from the query when no provider yields anything usable, so
//! a search always returns something renderable. No network access.

use domain::{SearchQuery, SearchResult};

use crate::urlencoding::{encode, slugify};

/// Number of entries in every degraded set
pub const DEGRADED_RESULT_COUNT: usize = 5;

/// Provider label reported for degraded responses
pub const DEGRADED_PROVIDER: &str = "degraded";

/// Build the deterministic degraded set for `query`
#[must_use]
pub fn degraded_results(query: &SearchQuery) -> Vec<SearchResult> {
    let text = query.as_str();
    let encoded = encode(text);
    let slug = slugify(text);

    vec![
        SearchResult::new(
            format!("{text} - Wikipedia"),
            format!("https://en.wikipedia.org/wiki/{slug}"),
            format!("Encyclopedia article about {text}."),
        ),
        SearchResult::new(
            format!("{text} - Google Search"),
            format!("https://www.google.com/search?q={encoded}"),
            format!("Search the web for {text} on Google."),
        ),
        SearchResult::new(
            format!("{text} at DuckDuckGo"),
            format!("https://duckduckgo.com/?q={encoded}"),
            format!("Private web search results for {text}."),
        ),
        SearchResult::new(
            format!("Questions about {text} - Stack Overflow"),
            format!("https://stackoverflow.com/search?q={encoded}"),
            format!("Programming questions and answers mentioning {text}."),
        ),
        SearchResult::new(
            format!("{text} repositories - GitHub"),
            format!("https://github.com/search?q={encoded}&type=repositories"),
            format!("Open source projects related to {text}."),
        ),
    ]
}
