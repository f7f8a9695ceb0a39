//! Auth handlers
//!
//! The sign-in round trip ends with a redirect to the frontend carrying
//! `auth=success&user=<JSON>` or `auth=error`; the session itself lives in
//! an HTTP-only cookie.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domain::{IdentityProvider, UserIdentity};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use url::Url;

use crate::{error::ApiError, state::AppState};

/// Cookie holding the anti-forgery value of a sign-in in progress
pub const OAUTH_STATE_COOKIE: &str = "leetsniff.oauth_state";

/// Body of `GET /auth/user`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserIdentity,
}

/// Body of `GET /auth/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_authenticated: bool,
    pub user: Option<UserIdentity>,
}

/// Body of `POST /auth/logout`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Query string of the provider callback
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    /// Set by the provider when the user declined consent
    #[serde(default)]
    pub error: Option<String>,
}

fn session_id<'a>(state: &AppState, jar: &'a CookieJar) -> Option<&'a str> {
    jar.get(&state.config.session.cookie_name)
        .map(Cookie::value)
        .filter(|v| !v.is_empty())
}

fn frontend_redirect(state: &AppState, pairs: &[(&str, &str)]) -> Redirect {
    let target = Url::parse(&state.config.server.frontend_url).map_or_else(
        |_| "/".to_string(),
        |mut url| {
            url.set_path("/");
            url.query_pairs_mut().clear().extend_pairs(pairs);
            url.into()
        },
    );
    Redirect::to(&target)
}

fn auth_error_redirect(state: &AppState) -> Redirect {
    frontend_redirect(state, &[("auth", "error")])
}

fn cookie(state: &AppState, name: String, value: String, path: &'static str) -> Cookie<'static> {
    Cookie::build((name, value))
        .path(path)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.session.secure_cookies)
        .build()
}

fn removal(name: String, path: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path(path).build()
}

/// The signed-in user, or 401
pub async fn current_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth.require_user(session_id(&state, &jar)).await?;
    Ok(Json(UserResponse { user }))
}

/// Whether a session is live, never an error for anonymous callers
pub async fn status(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<StatusResponse>, ApiError> {
    let user = state.auth.current_user(session_id(&state, &jar)).await?;
    Ok(Json(StatusResponse {
        is_authenticated: user.is_some(),
        user,
    }))
}

/// Destroy the session and clear its cookie
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    state
        .auth
        .logout(session_id(&state, &jar))
        .await
        .map_err(|e| {
            warn!(error = %e, "Logout failed");
            ApiError::Internal("Logout failed".to_string())
        })?;

    let jar = jar.remove(removal(state.config.session.cookie_name.clone(), "/"));
    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

/// Start a sign-in: redirect to the provider's consent page
#[instrument(skip(state, jar))]
pub async fn login(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let provider: IdentityProvider = provider
        .parse()
        .map_err(|_| ApiError::NotFound("Not found".to_string()))?;

    match state.auth.begin_login(provider) {
        Ok(redirect) => {
            let jar = jar.add(cookie(
                &state,
                OAUTH_STATE_COOKIE.to_string(),
                redirect.state,
                "/auth",
            ));
            Ok((jar, Redirect::to(&redirect.url)))
        },
        Err(e) => {
            warn!(error = %e, "Cannot start sign-in");
            Ok((jar, auth_error_redirect(&state)))
        },
    }
}

/// Finish a sign-in and hand the identity to the frontend
///
/// Every failure (declined consent, forged state, rejected code, malformed
/// profile) ends in the same `auth=error` redirect with no session created.
#[instrument(skip(state, jar, params))]
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let provider: IdentityProvider = provider
        .parse()
        .map_err(|_| ApiError::NotFound("Not found".to_string()))?;

    let expected_state = jar.get(OAUTH_STATE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(removal(OAUTH_STATE_COOKIE.to_string(), "/auth"));

    if let Some(reason) = params.error.as_deref() {
        warn!(reason, "Provider reported a sign-in error");
        return Ok((jar, auth_error_redirect(&state)));
    }

    if expected_state.is_none() || expected_state != params.state {
        warn!("Sign-in state mismatch");
        return Ok((jar, auth_error_redirect(&state)));
    }

    let code = params.code.unwrap_or_default();
    let session = match state.auth.complete_login(provider, &code).await {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, malformed = e.is_malformed_profile(), "Sign-in failed");
            return Ok((jar, auth_error_redirect(&state)));
        },
    };

    let Ok(user_json) = session.user.to_json() else {
        warn!("Could not encode identity for redirect");
        return Ok((jar, auth_error_redirect(&state)));
    };

    info!(login = %session.user.login, "Signed in");
    let jar = jar.add(cookie(
        &state,
        state.config.session.cookie_name.clone(),
        session.session_id,
        "/",
    ));
    Ok((
        jar,
        frontend_redirect(&state, &[("auth", "success"), ("user", &user_json)]),
    ))
}
