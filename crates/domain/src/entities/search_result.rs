//! Canonical search result

use serde::{Deserialize, Serialize};

/// Title used when a provider item has no usable title
pub const FALLBACK_TITLE: &str = "No title";

/// Link used when a provider item has no usable absolute URL
pub const FALLBACK_LINK: &str = "#";

/// Description used when a provider item has no usable description
pub const FALLBACK_DESCRIPTION: &str = "No description available";

/// Absolute ceiling on results returned by any call site
pub const MAX_RESULTS_CEILING: usize = 10;

/// A single normalized search result
///
/// All three fields are always present, non-empty strings. Construct through
/// [`SearchResult::normalized`] when the inputs come from an untrusted payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Title of the search result
    pub title: String,

    /// Absolute URL of the result, or `"#"`
    pub link: String,

    /// Short description of the content
    pub description: String,
}

impl SearchResult {
    /// Create a search result from already-clean values
    #[must_use]
    pub const fn new(title: String, link: String, description: String) -> Self {
        Self {
            title,
            link,
            description,
        }
    }

    /// Create a search result from optional provider fields, substituting
    /// the documented fallbacks for anything missing or blank
    #[must_use]
    pub fn normalized(title: Option<&str>, link: Option<&str>, description: Option<&str>) -> Self {
        let title = non_blank(title).unwrap_or(FALLBACK_TITLE);
        let link = non_blank(link)
            .filter(|l| is_absolute_http_url(l))
            .unwrap_or(FALLBACK_LINK);
        let description = non_blank(description).unwrap_or(FALLBACK_DESCRIPTION);

        Self::new(title.to_string(), link.to_string(), description.to_string())
    }

    /// True when every field is a non-empty string
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.title.is_empty() && !self.link.is_empty() && !self.description.is_empty()
    }

    /// Host of the link, if it has one
    #[must_use]
    pub fn domain(&self) -> Option<String> {
        url::Url::parse(&self.link)
            .ok()
            .and_then(|u| u.host_str().map(ToString::to_string))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn is_absolute_http_url(value: &str) -> bool {
    url::Url::parse(value).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_keeps_present_fields() {
        let result = SearchResult::normalized(
            Some("Rust"),
            Some("https://www.rust-lang.org/"),
            Some("A language empowering everyone"),
        );
        assert_eq!(result.title, "Rust");
        assert_eq!(result.link, "https://www.rust-lang.org/");
        assert_eq!(result.description, "A language empowering everyone");
    }

    #[test]
    fn missing_description_uses_fallback() {
        let result = SearchResult::normalized(Some("Rust"), Some("https://rust-lang.org"), None);
        assert_eq!(result.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn blank_fields_use_fallbacks() {
        let result = SearchResult::normalized(Some("  "), Some(""), Some("\n"));
        assert_eq!(result.title, FALLBACK_TITLE);
        assert_eq!(result.link, FALLBACK_LINK);
        assert_eq!(result.description, FALLBACK_DESCRIPTION);
        assert!(result.is_well_formed());
    }

    #[test]
    fn relative_or_non_http_links_use_fallback() {
        let relative = SearchResult::normalized(Some("t"), Some("/wiki/Rust"), Some("d"));
        assert_eq!(relative.link, FALLBACK_LINK);

        let script = SearchResult::normalized(Some("t"), Some("javascript:alert(1)"), Some("d"));
        assert_eq!(script.link, FALLBACK_LINK);
    }

    #[test]
    fn domain_extraction() {
        let result = SearchResult::normalized(
            Some("Rust"),
            Some("https://en.wikipedia.org/wiki/Rust"),
            None,
        );
        assert_eq!(result.domain().as_deref(), Some("en.wikipedia.org"));

        let fallback = SearchResult::normalized(None, None, None);
        assert!(fallback.domain().is_none());
    }

    #[test]
    fn serialization_uses_canonical_field_names() {
        let result = SearchResult::new(
            "t".to_string(),
            "https://example.com".to_string(),
            "d".to_string(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["title"], "t");
        assert_eq!(json["link"], "https://example.com");
        assert_eq!(json["description"], "d");
    }
}
