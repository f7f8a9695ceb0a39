//! Email address value object with validation
//!
//! Identity providers hand us email addresses verbatim; this type validates
//! the format without rewriting the address, so the local part seen by the
//! identity mapping is exactly what the provider sent.
//!
//! # Examples
//!
//! ```
//! use domain::EmailAddress;
//!
//! let email = EmailAddress::new("Jane.Doe@example.com").unwrap();
//! assert_eq!(email.local_part(), "Jane.Doe");
//! assert_eq!(email.domain(), "example.com");
//!
//! assert!(EmailAddress::new("invalid").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::errors::DomainError;

/// A validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress {
    value: String,
}

impl EmailAddress {
    /// Create a new email address, validating the format
    ///
    /// Surrounding whitespace is removed; casing is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the email format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let value = email.into().trim().to_string();

        if !value.validate_email() {
            return Err(DomainError::InvalidEmailAddress(value));
        }

        Ok(Self { value })
    }

    /// Get the email address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the local part (before @)
    pub fn local_part(&self) -> &str {
        self.value
            .rsplit_once('@')
            .map_or(self.value.as_str(), |(local, _)| local)
    }

    /// Get the domain part (after @)
    pub fn domain(&self) -> &str {
        self.value.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.value
    }
}
