//! Identity normalization
//!
//! One pure mapping per provider profile into the canonical [`UserIdentity`].
//! Values are copied as the provider sent them; nothing is synthesized, and
//! present-but-falsy values (`followers: 0`, `verified_email: false`) stay
//! present.

use serde_json::Value;
use tracing::debug;

use domain::{EmailAddress, GitHubExtensions, GoogleExtensions, ProviderExtensions, UserIdentity};

use crate::{
    error::IdentityError,
    profiles::{GitHubProfile, GoogleProfile, PROVIDER_GITHUB, PROVIDER_GOOGLE, ProviderProfile},
};

/// Normalize any supported provider profile
///
/// # Errors
///
/// Returns [`IdentityError::MalformedProfile`] if a required field is
/// missing. The caller must abort the sign-in rather than keep a partial
/// identity.
pub fn normalize_identity(profile: &ProviderProfile) -> Result<UserIdentity, IdentityError> {
    match profile {
        ProviderProfile::GitHub(profile) => github_identity(profile),
        ProviderProfile::Google(profile) => google_identity(profile),
    }
}

/// Map a GitHub profile
///
/// # Errors
///
/// Returns [`IdentityError::MalformedProfile`] if the id or username is blank.
pub fn github_identity(profile: &GitHubProfile) -> Result<UserIdentity, IdentityError> {
    let id = required(PROVIDER_GITHUB, "id", &profile.id)?;
    let login = required(PROVIDER_GITHUB, "username", &profile.username)?;

    let name = profile
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&login)
        .to_string();

    // Entries explicitly marked unverified are skipped
    let email = profile
        .emails
        .iter()
        .find(|e| e.verified != Some(false) && !e.value.trim().is_empty())
        .map(|e| e.value.trim().to_string());

    let avatar_url = profile
        .photos
        .first()
        .map(|p| p.value.trim().to_string())
        .filter(|p| !p.is_empty());

    let raw = &profile.raw;
    let extensions = GitHubExtensions {
        bio: raw_str(raw, "bio"),
        location: raw_str(raw, "location"),
        public_repos: raw_u64(raw, "public_repos"),
        followers: raw_u64(raw, "followers"),
        following: raw_u64(raw, "following"),
        created_at: raw_str(raw, "created_at"),
    };

    debug!(provider = PROVIDER_GITHUB, login = %login, "Normalized identity");

    Ok(UserIdentity {
        id,
        login,
        name,
        email,
        avatar_url,
        extensions: ProviderExtensions::Github(extensions),
    })
}

/// Map a Google profile
///
/// # Errors
///
/// Returns [`IdentityError::MalformedProfile`] if the id is blank, or the
/// email or photo list is empty, or the primary email is not an address.
pub fn google_identity(profile: &GoogleProfile) -> Result<UserIdentity, IdentityError> {
    let id = required(PROVIDER_GOOGLE, "id", &profile.id)?;

    let primary = profile
        .emails
        .first()
        .ok_or_else(|| IdentityError::malformed(PROVIDER_GOOGLE, "missing email"))?;
    let email = EmailAddress::new(primary.value.as_str())
        .map_err(|e| IdentityError::malformed(PROVIDER_GOOGLE, e.to_string()))?;

    let avatar_url = profile
        .photos
        .first()
        .map(|p| p.value.trim())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| IdentityError::malformed(PROVIDER_GOOGLE, "missing photo"))?
        .to_string();

    let login = email.local_part().to_string();
    let name = profile
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&login)
        .to_string();

    let raw = &profile.raw;
    let extensions = GoogleExtensions {
        verified_email: raw_bool(raw, "verified_email")
            .or_else(|| raw_bool(raw, "email_verified")),
        given_name: raw_str(raw, "given_name").or_else(|| profile.name.given_name.clone()),
        family_name: raw_str(raw, "family_name").or_else(|| profile.name.family_name.clone()),
        locale: raw_str(raw, "locale"),
    };

    debug!(provider = PROVIDER_GOOGLE, login = %login, "Normalized identity");

    Ok(UserIdentity {
        id,
        login,
        name,
        email: Some(email.to_string()),
        avatar_url: Some(avatar_url),
        extensions: ProviderExtensions::Google(extensions),
    })
}

fn required(provider: &'static str, field: &str, value: &str) -> Result<String, IdentityError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(IdentityError::malformed(provider, format!("missing {field}")));
    }
    Ok(value.to_string())
}

fn raw_str(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(ToString::to_string)
}

fn raw_u64(raw: &Value, key: &str) -> Option<u64> {
    raw.get(key).and_then(Value::as_u64)
}

fn raw_bool(raw: &Value, key: &str) -> Option<bool> {
    raw.get(key).and_then(Value::as_bool)
}
