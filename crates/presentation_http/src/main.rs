//! LeetSniff HTTP server binary

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{AuthService, ports::SearchPort};
use axum::http::{HeaderValue, Method, header};
use infrastructure::{
    AppConfig, HttpOAuthAdapter, MokaSessionStore, WebSearchAdapter, init_telemetry,
};
use presentation_http::{middleware::make_request_span, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_telemetry(&config.telemetry).context("Failed to initialize logging")?;

    info!("LeetSniff v{} starting...", env!("CARGO_PKG_VERSION"));

    let search_adapter = WebSearchAdapter::new(config.search.clone())
        .context("Failed to initialize search providers")?;
    if !search_adapter.has_usable_provider() {
        warn!("No search provider is configured; every search will use degraded results");
    }
    let search: Arc<dyn SearchPort> = Arc::new(search_adapter);

    let oauth = HttpOAuthAdapter::new(config.oauth.clone(), config.server.public_url.clone())
        .context("Failed to initialize OAuth client")?;
    let providers = config.oauth.configured_providers();
    if providers.is_empty() {
        warn!("No identity provider is configured; sign-in will fail");
    }
    let sessions = MokaSessionStore::from_config(&config.session);
    let auth = Arc::new(AuthService::new(Arc::new(oauth), Arc::new(sessions)));

    let cors_layer = cors_layer(&config);
    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));
    let body_limit = config.server.max_body_size_bytes;

    info!(
        addr = %addr,
        frontend = %config.server.frontend_url,
        providers = ?providers,
        max_results = config.search.max_results,
        "Configuration loaded"
    );

    let state = AppState {
        search,
        auth,
        config: Arc::new(config),
    };

    let app = routes::create_router(state)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// CORS for the configured origins, with credentials so the session cookie
/// travels on cross-origin calls from the frontend
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::HeaderName::from_static("x-request-id")])
        .allow_credentials(true)
}

async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
