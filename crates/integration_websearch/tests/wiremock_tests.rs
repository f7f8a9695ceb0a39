//! Integration tests for the provider chain using WireMock
//!
//! These tests mock HTTP responses to verify orchestrator behavior without
//! making actual API calls.

use domain::{FALLBACK_DESCRIPTION, SearchQuery};
use integration_websearch::{
    DEGRADED_PROVIDER, SearchOrchestrator, WebSearchConfig, degraded_results,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

/// Sample RapidAPI Google Search response
fn rapidapi_success_response() -> serde_json::Value {
    serde_json::json!({
        "search_term": "rust programming",
        "knowledge_panel": null,
        "results": [
            {
                "position": 1,
                "url": "https://www.rust-lang.org/",
                "title": "Rust Programming Language",
                "description": "A language empowering everyone to build reliable and efficient software."
            },
            {
                "position": 2,
                "url": "https://doc.rust-lang.org/book/",
                "title": "The Rust Programming Language"
            }
        ],
        "related_keywords": {"spelling_suggestion": null, "keywords": []}
    })
}

/// Sample Brave Search API response
fn brave_success_response(count: usize) -> serde_json::Value {
    let results: Vec<_> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "title": format!("Brave result {i}"),
                "url": format!("https://example.com/{i}"),
                "description": format!("Description {i}"),
                "age": "2 days ago"
            })
        })
        .collect();
    serde_json::json!({
        "query": {"original": "rust programming"},
        "web": {"results": results}
    })
}

/// Sample DuckDuckGo Instant Answer response
fn duckduckgo_success_response() -> serde_json::Value {
    serde_json::json!({
        "AbstractText": "Rust is a multi-paradigm, general-purpose programming language.",
        "AbstractSource": "Wikipedia",
        "AbstractURL": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
        "Heading": "Rust (programming language)",
        "Type": "A",
        "RelatedTopics": [
            {
                "Text": "Rust Foundation - The non-profit organization supporting Rust",
                "FirstURL": "https://foundation.rust-lang.org/"
            }
        ],
        "Results": []
    })
}

fn config_for(server: &MockServer) -> WebSearchConfig {
    WebSearchConfig {
        rapidapi_key: Some("rapid-key".to_string()),
        rapidapi_base_url: format!("{}/rapid", server.uri()),
        brave_api_key: Some("brave-key".to_string()),
        brave_base_url: format!("{}/res/v1", server.uri()),
        duckduckgo_base_url: format!("{}/ddg", server.uri()),
        ..WebSearchConfig::for_testing()
    }
}

fn query(text: &str) -> SearchQuery {
    SearchQuery::parse(text).unwrap()
}

// =============================================================================
// Primary provider
// =============================================================================

#[tokio::test]
async fn test_rapidapi_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rapid/"))
        .and(header("X-RapidAPI-Key", "rapid-key"))
        .and(header("X-RapidAPI-Host", "google-search74.p.rapidapi.com"))
        .and(query_param("query", "rust programming"))
        .and(query_param("limit", "5"))
        .and(query_param("related_keywords", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rapidapi_success_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_success_response(3)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(config_for(&mock_server)).unwrap();
    let response = orchestrator.search(&query("rust programming")).await;

    assert_eq!(response.provider, "rapidapi-google");
    assert!(!response.degraded);
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].title, "Rust Programming Language");
    assert_eq!(response.results[0].link, "https://www.rust-lang.org/");
    assert_eq!(response.results[1].description, FALLBACK_DESCRIPTION);
}

// =============================================================================
// Fallback chain
// =============================================================================

#[tokio::test]
async fn test_primary_failure_falls_back_to_brave_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rapid/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(header("X-Subscription-Token", "brave-key"))
        .and(query_param("q", "rust programming"))
        .and(query_param("count", "5"))
        .and(query_param("safesearch", "moderate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_success_response(3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ddg/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(duckduckgo_success_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = WebSearchConfig {
        duckduckgo_enabled: true,
        ..config_for(&mock_server)
    };
    let orchestrator = SearchOrchestrator::new(config).unwrap();
    let response = orchestrator.search(&query("rust programming")).await;

    assert_eq!(response.provider, "brave");
    let titles: Vec<_> = response.results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Brave result 1", "Brave result 2", "Brave result 3"]);
}

#[tokio::test]
async fn test_empty_primary_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rapid/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_success_response(1)))
        .mount(&mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(config_for(&mock_server)).unwrap();
    let response = orchestrator.search(&query("rust")).await;

    assert_eq!(response.provider, "brave");
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rapid/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_success_response(2)))
        .mount(&mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(config_for(&mock_server)).unwrap();
    let response = orchestrator.search(&query("rust")).await;

    assert_eq!(response.provider, "brave");
    assert_eq!(response.results.len(), 2);
}

#[tokio::test]
async fn test_rate_limit_and_auth_errors_fall_back_to_duckduckgo() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rapid/"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "60"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ddg/"))
        .and(query_param("q", "rust"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(duckduckgo_success_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = WebSearchConfig {
        duckduckgo_enabled: true,
        ..config_for(&mock_server)
    };
    let orchestrator = SearchOrchestrator::new(config).unwrap();
    let response = orchestrator.search(&query("rust")).await;

    assert_eq!(response.provider, "duckduckgo");
    assert_eq!(response.results[0].title, "Rust (programming language)");
    assert_eq!(response.results[1].title, "Rust Foundation");
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rapid/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(rapidapi_success_response())
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_success_response(1)))
        .mount(&mock_server)
        .await;

    let config = WebSearchConfig {
        timeout_ms: 200,
        ..config_for(&mock_server)
    };
    let orchestrator = SearchOrchestrator::new(config).unwrap();
    let response = orchestrator.search(&query("rust")).await;

    assert_eq!(response.provider, "brave");
}

// =============================================================================
// Degraded mode
// =============================================================================

#[tokio::test]
async fn test_all_providers_fail_returns_degraded_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(config_for(&mock_server)).unwrap();
    let q = query("rust programming");

    let first = orchestrator.search(&q).await;
    let second = orchestrator.search(&q).await;

    assert!(first.degraded);
    assert_eq!(first.provider, DEGRADED_PROVIDER);
    assert_eq!(first.results, degraded_results(&q));
    assert_eq!(first.results, second.results);
}

#[tokio::test]
async fn test_no_credentials_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_success_response(3)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = WebSearchConfig {
        rapidapi_base_url: format!("{}/rapid", mock_server.uri()),
        brave_base_url: format!("{}/res/v1", mock_server.uri()),
        ..WebSearchConfig::for_testing()
    };
    let orchestrator = SearchOrchestrator::new(config).unwrap();
    let response = orchestrator.search(&query("rust")).await;

    assert!(response.degraded);
    assert_eq!(response.results.len(), 5);
    assert!(response.results.iter().all(domain::SearchResult::is_well_formed));
}

#[tokio::test]
async fn test_blank_keys_make_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_success_response(3)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = WebSearchConfig {
        rapidapi_key: Some(String::new()),
        brave_api_key: Some("   ".to_string()),
        ..config_for(&mock_server)
    };
    let orchestrator = SearchOrchestrator::new(config).unwrap();
    assert!(!orchestrator.has_usable_provider());

    let response = orchestrator.search(&query("rust")).await;

    assert!(response.degraded);
    assert_eq!(response.provider, DEGRADED_PROVIDER);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// Result ceiling
// =============================================================================

#[tokio::test]
async fn test_results_truncated_to_max() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brave_success_response(8)))
        .mount(&mock_server)
        .await;

    let config = WebSearchConfig {
        rapidapi_key: None,
        max_results: 3,
        ..config_for(&mock_server)
    };
    let orchestrator = SearchOrchestrator::new(config).unwrap();
    let response = orchestrator.search(&query("rust")).await;

    assert_eq!(response.results.len(), 3);
    assert_eq!(response.results[0].title, "Brave result 1");
}
