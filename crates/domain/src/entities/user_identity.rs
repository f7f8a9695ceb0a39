//! Canonical signed-in identity
//!
//! Every identity provider profile is normalized into a [`UserIdentity`].
//! The provider-specific extension fields live in a tagged variant so a
//! GitHub identity can never carry Google fields and vice versa. On the wire
//! the record is a single flat JSON object tagged by `"provider"`:
//!
//! ```json
//! {"id":"583231","login":"octocat","name":"The Octocat","provider":"github","followers":0}
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Supported identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityProvider {
    /// GitHub OAuth
    Github,
    /// Google OAuth
    Google,
}

impl IdentityProvider {
    /// Lowercase provider name as used in routes and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for IdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentityProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(Self::Github),
            "google" => Ok(Self::Google),
            other => Err(DomainError::ValidationError(format!(
                "Unsupported identity provider: {other}"
            ))),
        }
    }
}

/// Fields only GitHub profiles carry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GitHubExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Fields only Google profiles carry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoogleExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Provider tag plus the fields meaningful for that provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderExtensions {
    Github(GitHubExtensions),
    Google(GoogleExtensions),
}

impl ProviderExtensions {
    /// The provider this variant belongs to
    #[must_use]
    pub const fn provider(&self) -> IdentityProvider {
        match self {
            Self::Github(_) => IdentityProvider::Github,
            Self::Google(_) => IdentityProvider::Google,
        }
    }
}

/// The canonical signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Provider-scoped unique id
    pub id: String,

    /// Login handle
    pub login: String,

    /// Display name (may equal `login`)
    pub name: String,

    /// Email address, when the provider supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Avatar URL, when the provider supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Provider tag and provider-specific fields
    #[serde(flatten)]
    pub extensions: ProviderExtensions,
}

impl UserIdentity {
    /// Which provider authenticated this user
    #[must_use]
    pub const fn provider(&self) -> IdentityProvider {
        self.extensions.provider()
    }

    /// GitHub-only fields, if this is a GitHub identity
    #[must_use]
    pub const fn github(&self) -> Option<&GitHubExtensions> {
        match &self.extensions {
            ProviderExtensions::Github(ext) => Some(ext),
            ProviderExtensions::Google(_) => None,
        }
    }

    /// Google-only fields, if this is a Google identity
    #[must_use]
    pub const fn google(&self) -> Option<&GoogleExtensions> {
        match &self.extensions {
            ProviderExtensions::Google(ext) => Some(ext),
            ProviderExtensions::Github(_) => None,
        }
    }

    /// Parse an identity from its JSON wire form
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PersistedStateCorrupt`] if the JSON is invalid
    /// or does not have the identity shape.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::PersistedStateCorrupt(e.to_string()))
    }

    /// Serialize to the JSON wire form
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(|e| DomainError::ValidationError(e.to_string()))
    }
}
