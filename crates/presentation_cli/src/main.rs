//! LeetSniff CLI
//!
//! Terminal client for the LeetSniff server. Every command runs a navigation
//! through the same session reconciliation and query state machine a browser
//! front end would, with the identity cached on disk between runs.

#![allow(clippy::print_stdout)]

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use application::{
    ClientShell, Dispatch, NavigationReport, QueryNavigationService, SessionReconciler,
    ports::{IdentityCachePort, SearchPort, SessionGatewayPort},
};
use clap::{Parser, Subcommand};
use domain::{IdentityProvider, QueryExecutionState, SessionState};
use infrastructure::{ApiClient, AppConfig, FileIdentityCache, TelemetryConfig, init_telemetry};
use url::Url;

/// LeetSniff CLI
#[derive(Parser)]
#[command(name = "leetsniff-cli")]
#[command(author, version, about = "LeetSniff search client", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file stem (`config` reads `config.toml` when present)
    #[arg(short, long, default_value = "config")]
    config: PathBuf,

    /// Server URL, overrides `client.api_base_url`
    #[arg(short, long)]
    url: Option<String>,

    /// Server session id, as set in the session cookie after sign-in
    #[arg(long, env = "LEETSNIFF_SESSION")]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the web
    Search {
        /// Query text
        query: String,
    },

    /// Process a front-end location, e.g. the URL a sign-in redirected to
    ///
    /// Example: leetsniff-cli open 'http://localhost:3000/?auth=success&user=...'
    Open {
        /// Absolute URL, or a path relative to `client.app_base_url`
        location: String,
    },

    /// Show the signed-in user
    Whoami,

    /// Print the URL that starts a sign-in with a provider
    Login {
        /// `github` or `google`
        provider: IdentityProvider,
    },

    /// Sign out here and on the server
    Logout,

    /// Check server health
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Absolute location for `input`, resolving paths against `app_base`
fn resolve_location(app_base: &Url, input: &str) -> anyhow::Result<Url> {
    match Url::parse(input) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => app_base
            .join(input)
            .with_context(|| format!("Invalid location: {input}")),
        Err(e) => Err(e).with_context(|| format!("Invalid location: {input}")),
    }
}

fn login_url(api_base: &Url, provider: IdentityProvider) -> anyhow::Result<Url> {
    api_base
        .join(&format!("auth/{provider}"))
        .context("Invalid server URL")
}

fn describe_session(session: &SessionState) -> String {
    session.current_user().map_or_else(
        || "Not signed in".to_string(),
        |user| {
            let email = user
                .email
                .as_deref()
                .map(|e| format!(" <{e}>"))
                .unwrap_or_default();
            format!(
                "Signed in as {} ({}){} via {}",
                user.login,
                user.name,
                email,
                user.extensions.provider()
            )
        },
    )
}

fn render_query(state: &QueryExecutionState) -> String {
    if let Some(error) = state.error() {
        return error.to_string();
    }

    let results = state.results();
    if results.is_empty() {
        return format!("No results found for \"{}\"", state.query());
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}\n   {}\n   {}", i + 1, r.title, r.link, r.description))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn print_report(shell: &mut ClientShell, report: &NavigationReport) {
    if let Some(message) = shell.take_auth_status().and_then(|s| s.user_message()) {
        println!("{message}");
    }
    if report.dispatch == Dispatch::RedirectHome {
        println!("Location: {}", report.location);
    } else if let Some(cleanup) = &report.reconcile.cleanup {
        println!("Location: {}", cleanup.replace_with);
    }
    if report.reconcile.source.is_some() {
        println!("{}", describe_session(shell.session()));
    }
}

fn build_shell(config: &AppConfig, api: &ApiClient) -> ClientShell {
    let cache: Arc<dyn IdentityCachePort> =
        Arc::new(FileIdentityCache::new(config.client.identity_cache_path.clone()));
    let gateway: Arc<dyn SessionGatewayPort> = Arc::new(api.clone());
    let search: Arc<dyn SearchPort> = Arc::new(api.clone());

    let reconciler =
        SessionReconciler::new(cache, gateway).with_cleanup_delay(config.client.cleanup_delay());
    ClientShell::new(reconciler, QueryNavigationService::new(search))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_telemetry(&TelemetryConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        ..TelemetryConfig::default()
    })?;

    let mut config = AppConfig::load_from(&cli.config).context("Failed to load configuration")?;
    if let Some(url) = cli.url {
        config.client.api_base_url = url;
    }

    let mut api = ApiClient::new(&config.client)?;
    if let Some(session) = cli.session.as_deref() {
        api = api.with_session_cookie(&config.session.cookie_name, session);
    }
    let app_base = Url::parse(&config.client.app_base_url).context("Invalid client.app_base_url")?;

    match cli.command {
        Commands::Search { query } => {
            let mut shell = build_shell(&config, &api);
            let report = shell.navigate(&app_base).await;
            print_report(&mut shell, &report);

            match shell.submit(&query, &report.location).await? {
                Some(_) => println!("{}", render_query(&shell.query_state())),
                None => println!("Nothing to search for"),
            }
        },

        Commands::Open { location } => {
            let location = resolve_location(&app_base, &location)?;
            let mut shell = build_shell(&config, &api);
            let report = shell.navigate(&location).await;
            print_report(&mut shell, &report);

            if shell.query_state().last_executed_query().is_some() {
                println!("{}", render_query(&shell.query_state()));
            }
        },

        Commands::Whoami => {
            let mut shell = build_shell(&config, &api);
            shell.navigate(&app_base).await;
            println!("{}", describe_session(shell.session()));
        },

        Commands::Login { provider } => {
            println!("Open this URL in a browser to sign in:");
            println!("{}", login_url(api.base_url(), provider)?);
            println!();
            println!("Then pass the page it lands on to `leetsniff-cli open`.");
        },

        Commands::Logout => {
            let mut shell = build_shell(&config, &api);
            shell.navigate(&app_base).await;
            shell.logout().await;
            println!("Logged out");
        },

        Commands::Health => match api.health().await {
            Ok(health) => {
                println!("Healthy ({} v{})", health.status, health.version);
            },
            Err(e) => {
                println!("Unhealthy: {e}");
                std::process::exit(1);
            },
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use domain::{
        GitHubExtensions, ProviderExtensions, QueryOutcome, SearchResult, UserIdentity,
    };

    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:3000/").unwrap()
    }

    #[test]
    fn log_filter_verbosity() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn parses_search_with_session() {
        let cli = Cli::try_parse_from([
            "leetsniff-cli",
            "-vv",
            "--session",
            "abc123",
            "search",
            "rust async",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.session.as_deref(), Some("abc123"));
        assert!(matches!(cli.command, Commands::Search { query } if query == "rust async"));
    }

    #[test]
    fn parses_login_provider() {
        let cli = Cli::try_parse_from(["leetsniff-cli", "login", "github"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Login {
                provider: IdentityProvider::Github
            }
        ));
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["leetsniff-cli", "login", "myspace"]).is_err());
    }

    #[test]
    fn search_requires_query() {
        assert!(Cli::try_parse_from(["leetsniff-cli", "search"]).is_err());
    }

    #[test]
    fn relative_location_joins_app_base() {
        let url = resolve_location(&base(), "/search?q=rust").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/search?q=rust");
    }

    #[test]
    fn absolute_location_is_kept() {
        let url = resolve_location(&base(), "https://app.example/?auth=error").unwrap();
        assert_eq!(url.host_str(), Some("app.example"));
    }

    #[test]
    fn login_url_targets_provider_route() {
        let api = Url::parse("http://localhost:5000/").unwrap();
        assert_eq!(
            login_url(&api, IdentityProvider::Google).unwrap().as_str(),
            "http://localhost:5000/auth/google"
        );
    }

    #[test]
    fn describes_anonymous_session() {
        assert_eq!(describe_session(&SessionState::new()), "Not signed in");
    }

    #[test]
    fn describes_signed_in_user() {
        let mut session = SessionState::new();
        session.set_user(UserIdentity {
            id: "1".to_string(),
            login: "octocat".to_string(),
            name: "The Octocat".to_string(),
            email: Some("octocat@github.com".to_string()),
            avatar_url: None,
            extensions: ProviderExtensions::Github(GitHubExtensions::default()),
        });

        assert_eq!(
            describe_session(&session),
            "Signed in as octocat (The Octocat) <octocat@github.com> via github"
        );
    }

    #[test]
    fn renders_numbered_results() {
        let mut state = QueryExecutionState::new();
        let ticket = state.begin("rust").unwrap();
        state.settle(
            &ticket,
            QueryOutcome::Results(vec![SearchResult::new(
                "Rust".to_string(),
                "https://www.rust-lang.org/".to_string(),
                "A language".to_string(),
            )]),
        );

        assert_eq!(
            render_query(&state),
            "1. Rust\n   https://www.rust-lang.org/\n   A language"
        );
    }

    #[test]
    fn renders_failure_message() {
        let mut state = QueryExecutionState::new();
        let ticket = state.begin("rust").unwrap();
        state.settle(&ticket, QueryOutcome::Failed("Failed to fetch results. Please try again.".into()));

        assert_eq!(render_query(&state), "Failed to fetch results. Please try again.");
    }
}
