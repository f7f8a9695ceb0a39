#![forbid(unsafe_code)]
//! Identity provider integration for LeetSniff
//!
//! Brings GitHub and Google profiles into a common profile shape
//! ([`ProviderProfile`]) and maps them into the canonical
//! [`domain::UserIdentity`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_identity::{GitHubProfile, ProviderProfile, normalize_identity};
//!
//! let profile = GitHubProfile::from_api(user_json, Some(emails))?;
//! let identity = normalize_identity(&ProviderProfile::GitHub(profile))?;
//! ```

mod error;
mod normalizer;
mod profiles;

pub use error::IdentityError;
pub use normalizer::{github_identity, google_identity, normalize_identity};
pub use profiles::{
    GitHubEmailEntry, GitHubProfile, GoogleProfile, ProfileEmail, ProfileName, ProfilePhoto,
    ProviderProfile,
};
