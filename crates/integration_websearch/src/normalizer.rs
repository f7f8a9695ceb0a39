//! Response normalization
//!
//! One pure mapping per [`ResponseShape`]. Missing fields fall back to the
//! documented placeholder strings; an item that is not an object, or whose
//! fields have the wrong JSON types, is dropped without failing the batch.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use domain::{SearchQuery, SearchResult};

use crate::{catalog::ResponseShape, error::WebSearchError};

/// Generic result-list item
#[derive(Debug, Deserialize)]
struct ListItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "link")]
    url: Option<String>,
    #[serde(default, alias = "snippet")]
    description: Option<String>,
}

/// DuckDuckGo Instant Answer response structures
mod instant_answer {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Response {
        #[serde(default, rename = "AbstractText")]
        pub abstract_text: String,

        #[serde(default, rename = "AbstractURL")]
        pub abstract_url: String,

        #[serde(default)]
        pub heading: String,

        #[serde(default)]
        pub definition: String,

        #[serde(default, rename = "DefinitionURL")]
        pub definition_url: String,

        #[serde(default)]
        pub related_topics: Vec<serde_json::Value>,

        #[serde(default)]
        pub results: Vec<serde_json::Value>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Topic {
        #[serde(default)]
        pub text: String,

        #[serde(default, rename = "FirstURL")]
        pub first_url: String,
    }
}

/// Normalize a provider response body into canonical results
///
/// A missing result array is an empty list, not an error.
///
/// # Errors
///
/// Returns [`WebSearchError::ParseError`] if the body does not have the
/// provider's top-level shape at all.
pub fn normalize(
    shape: ResponseShape,
    body: &Value,
    query: &SearchQuery,
) -> Result<Vec<SearchResult>, WebSearchError> {
    match shape {
        ResponseShape::ResultList { pointer } => normalize_list(body, pointer),
        ResponseShape::InstantAnswer => normalize_instant_answer(body, query),
    }
}

fn normalize_list(body: &Value, pointer: &str) -> Result<Vec<SearchResult>, WebSearchError> {
    if !body.is_object() {
        return Err(WebSearchError::ParseError(
            "expected a JSON object".to_string(),
        ));
    }

    let Some(items) = body.pointer(pointer).and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let results: Vec<_> = items.iter().filter_map(normalize_item).collect();

    if results.len() < items.len() {
        debug!(
            dropped = items.len() - results.len(),
            "Dropped provider items that could not be normalized"
        );
    }

    Ok(results)
}

fn normalize_item(item: &Value) -> Option<SearchResult> {
    if !item.is_object() {
        return None;
    }
    let raw = ListItem::deserialize(item).ok()?;
    Some(SearchResult::normalized(
        raw.title.as_deref(),
        raw.url.as_deref(),
        raw.description.as_deref(),
    ))
}

fn normalize_instant_answer(
    body: &Value,
    query: &SearchQuery,
) -> Result<Vec<SearchResult>, WebSearchError> {
    let response = instant_answer::Response::deserialize(body)
        .map_err(|e| WebSearchError::ParseError(e.to_string()))?;

    let mut results = Vec::new();

    if !response.abstract_text.is_empty() && !response.abstract_url.is_empty() {
        let title = if response.heading.is_empty() {
            query.as_str()
        } else {
            response.heading.as_str()
        };
        results.push(SearchResult::normalized(
            Some(title),
            Some(&response.abstract_url),
            Some(&response.abstract_text),
        ));
    }

    if !response.definition.is_empty() && !response.definition_url.is_empty() {
        results.push(SearchResult::normalized(
            Some(&format!("Definition: {}", response.heading)),
            Some(&response.definition_url),
            Some(&response.definition),
        ));
    }

    let topics = response
        .related_topics
        .iter()
        .chain(response.results.iter())
        .filter_map(|value| instant_answer::Topic::deserialize(value).ok())
        .filter(|topic| !topic.first_url.is_empty() && !topic.text.is_empty());

    for topic in topics {
        // Topic text reads "Title - description"
        let title = topic.text.split(" - ").next().unwrap_or(&topic.text);
        results.push(SearchResult::normalized(
            Some(title),
            Some(&topic.first_url),
            Some(&topic.text),
        ));
    }

    Ok(results)
}
