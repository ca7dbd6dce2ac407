//! Canonical user model.
//!
//! Every identity source converts into this record; it is the only shape
//! the local credential store persists. The `source` tag records which
//! system of record owns the identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// System of record that owns a class of identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthSource {
    /// Locally-owned credential store.
    #[serde(rename = "auth")]
    Local,
    /// Prison management system.
    #[serde(rename = "nomis")]
    Prison,
    /// Probation case management system.
    #[serde(rename = "delius")]
    Probation,
    /// Directory federation identity provider.
    #[serde(rename = "azuread")]
    Directory,
}

impl AuthSource {
    /// Returns the stable wire name for this source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "auth",
            Self::Prison => "nomis",
            Self::Probation => "delius",
            Self::Directory => "azuread",
        }
    }

    /// Parses a source from its wire name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auth" => Some(Self::Local),
            "nomis" => Some(Self::Prison),
            "delius" => Some(Self::Probation),
            "azuread" => Some(Self::Directory),
            _ => None,
        }
    }
}

/// A person's name, split as the backing systems record it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

impl Person {
    /// Creates a new person.
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Gets the person's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The canonical local user record.
///
/// Non-local identities are merged into the local user table through this
/// shape; it carries only what the authentication contract needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique username.
    pub username: String,
    /// System of record that owns this identity.
    pub source: AuthSource,
    /// Email address, if known.
    pub email: Option<String>,
    /// Whether the email address has been verified.
    pub verified: bool,
    /// Whether the account is enabled.
    pub enabled: bool,
    /// Person name, if known.
    pub person: Option<Person>,
    /// When the user last logged in.
    pub last_logged_in: DateTime<Utc>,
}

impl User {
    /// Creates a new enabled user for the given source.
    #[must_use]
    pub fn new(username: impl Into<String>, source: AuthSource) -> Self {
        Self {
            username: username.into(),
            source,
            email: None,
            verified: false,
            enabled: true,
            person: None,
            last_logged_in: Utc::now(),
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the verified flag.
    #[must_use]
    pub const fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the person name.
    #[must_use]
    pub fn with_person(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.person = Some(Person::new(first_name, last_name));
        self
    }

    /// Sets the last login timestamp.
    #[must_use]
    pub const fn with_last_logged_in(mut self, at: DateTime<Utc>) -> Self {
        self.last_logged_in = at;
        self
    }

    /// Gets the display name: the person's full name, or the username.
    #[must_use]
    pub fn name(&self) -> String {
        self.person
            .as_ref()
            .map_or_else(|| self.username.clone(), Person::full_name)
    }
}
