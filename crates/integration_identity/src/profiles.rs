//! Provider profile shapes
//!
//! Both providers are first brought into the common OAuth-strategy profile
//! shape (id, username, display name, email and photo lists, name parts and
//! the raw provider document). The identity mapping only ever reads these
//! types, never the provider APIs directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use domain::IdentityProvider;

use crate::error::IdentityError;

/// One email entry of a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEmail {
    pub value: String,
    /// `None` when the provider did not say
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// One photo entry of a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePhoto {
    pub value: String,
}

/// Structured name parts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
}

/// GitHub profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<ProfileEmail>,
    #[serde(default)]
    pub photos: Vec<ProfilePhoto>,
    /// Raw `/user` document
    #[serde(default, rename = "_json")]
    pub raw: Value,
}

/// Entry of GitHub's `/user/emails` listing
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEmailEntry {
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub verified: Option<bool>,
}

impl GitHubProfile {
    /// Assemble a profile from the `/user` document and, when the email
    /// scope was granted, the `/user/emails` listing
    ///
    /// The primary address is listed first. Without a listing, the public
    /// email from `/user` is used with unknown verification state.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MalformedProfile`] if the document carries
    /// no id or login.
    pub fn from_api(user: Value, emails: Option<Vec<GitHubEmailEntry>>) -> Result<Self, IdentityError> {
        let id = match user.get("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => return Err(IdentityError::malformed(PROVIDER_GITHUB, "missing id")),
        };

        let username = str_field(&user, "login")
            .ok_or_else(|| IdentityError::malformed(PROVIDER_GITHUB, "missing login"))?;

        let emails = match emails {
            Some(mut entries) => {
                entries.sort_by_key(|e| !e.primary);
                entries
                    .into_iter()
                    .map(|e| ProfileEmail {
                        value: e.email,
                        verified: e.verified,
                    })
                    .collect()
            },
            None => str_field(&user, "email")
                .map(|value| ProfileEmail {
                    value,
                    verified: None,
                })
                .into_iter()
                .collect(),
        };

        let photos = str_field(&user, "avatar_url")
            .map(|value| ProfilePhoto { value })
            .into_iter()
            .collect();

        Ok(Self {
            id,
            username,
            display_name: str_field(&user, "name"),
            emails,
            photos,
            raw: user,
        })
    }
}

/// Google profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: ProfileName,
    #[serde(default)]
    pub emails: Vec<ProfileEmail>,
    #[serde(default)]
    pub photos: Vec<ProfilePhoto>,
    /// Raw userinfo document
    #[serde(default, rename = "_json")]
    pub raw: Value,
}

impl GoogleProfile {
    /// Assemble a profile from a userinfo document
    ///
    /// Accepts both the OpenID Connect (`sub`, `email_verified`) and the
    /// legacy v2 (`id`, `verified_email`) field names.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MalformedProfile`] if the document carries
    /// no subject id.
    pub fn from_userinfo(userinfo: Value) -> Result<Self, IdentityError> {
        let id = str_field(&userinfo, "sub")
            .or_else(|| str_field(&userinfo, "id"))
            .ok_or_else(|| IdentityError::malformed(PROVIDER_GOOGLE, "missing subject id"))?;

        let verified = userinfo
            .get("email_verified")
            .or_else(|| userinfo.get("verified_email"))
            .and_then(Value::as_bool);

        let emails = str_field(&userinfo, "email")
            .map(|value| ProfileEmail { value, verified })
            .into_iter()
            .collect();

        let photos = str_field(&userinfo, "picture")
            .map(|value| ProfilePhoto { value })
            .into_iter()
            .collect();

        Ok(Self {
            id,
            display_name: str_field(&userinfo, "name"),
            name: ProfileName {
                given_name: str_field(&userinfo, "given_name"),
                family_name: str_field(&userinfo, "family_name"),
            },
            emails,
            photos,
            raw: userinfo,
        })
    }
}

/// A profile from one of the supported providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderProfile {
    #[serde(rename = "github")]
    GitHub(GitHubProfile),
    Google(GoogleProfile),
}

impl ProviderProfile {
    /// Provider that issued this profile
    #[must_use]
    pub const fn provider(&self) -> IdentityProvider {
        match self {
            Self::GitHub(_) => IdentityProvider::Github,
            Self::Google(_) => IdentityProvider::Google,
        }
    }
}

pub(crate) const PROVIDER_GITHUB: &str = "github";
pub(crate) const PROVIDER_GOOGLE: &str = "google";

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
