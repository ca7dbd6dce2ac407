//! Identity variants per system of record.
//!
//! A closed tagged variant keeps the precedence chain and gateways
//! exhaustive and switch-checkable. Each variant is an immutable, freshly
//! constructed value scoped to one lookup request; there is no caching
//! and no shared mutable state.

use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;

use gatehouse_model::{AuthSource, Staff, StaffAccountDetail, StaffRole, User};

use crate::authority::{prison_authorities, PROBATION_BASELINE_AUTHORITY};
use crate::eligibility::LoginEligibility;

// ============================================================================
// Variants
// ============================================================================

/// An identity owned by the local credential store.
///
/// Self-contained: authorities come directly from assigned role records
/// and the canonical conversion is the identity function.
#[derive(Debug, Clone)]
pub struct LocalIdentity {
    user: User,
    authorities: BTreeSet<String>,
}

impl LocalIdentity {
    /// Creates a local identity from the stored user and its assigned
    /// authority records.
    #[must_use]
    pub fn new(user: User, authorities: BTreeSet<String>) -> Self {
        Self { user, authorities }
    }

    /// The wrapped canonical user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }
}

/// An identity owned by the prison management system.
///
/// Wraps the staff record, the account detail carrying status and
/// credential expiry, and the caseload-scoped role assignments.
/// Authorities are derived once at construction.
#[derive(Debug, Clone)]
pub struct PrisonIdentity {
    staff: Staff,
    account_detail: StaffAccountDetail,
    authorities: BTreeSet<String>,
}

impl PrisonIdentity {
    /// Creates a prison identity from the source records.
    #[must_use]
    pub fn new(staff: Staff, account_detail: StaffAccountDetail, roles: &[StaffRole]) -> Self {
        let authorities = prison_authorities(roles);
        Self {
            staff,
            account_detail,
            authorities,
        }
    }

    /// The wrapped staff record.
    #[must_use]
    pub const fn staff(&self) -> &Staff {
        &self.staff
    }

    /// The wrapped account detail.
    #[must_use]
    pub const fn account_detail(&self) -> &StaffAccountDetail {
        &self.account_detail
    }

    /// Evaluates login eligibility at the current instant.
    #[must_use]
    pub fn eligibility(&self) -> LoginEligibility {
        LoginEligibility::evaluate(
            self.account_detail.account_status,
            self.account_detail.password_expiry,
            Utc::now(),
        )
    }
}

/// An identity owned by the probation case management system.
#[derive(Debug, Clone)]
pub struct ProbationIdentity {
    username: String,
    user_id: Uuid,
    first_name: String,
    surname: String,
    email: String,
    enabled: bool,
    locked: bool,
    authorities: BTreeSet<String>,
}

impl ProbationIdentity {
    /// Creates a probation identity.
    ///
    /// The caller supplies the pre-resolved authority set; the probation
    /// baseline authority is always appended.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        username: impl Into<String>,
        user_id: Uuid,
        first_name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        enabled: bool,
        locked: bool,
        mut authorities: BTreeSet<String>,
    ) -> Self {
        authorities.insert(PROBATION_BASELINE_AUTHORITY.to_string());
        Self {
            username: username.into(),
            user_id,
            first_name: first_name.into(),
            surname: surname.into(),
            email: email.into(),
            enabled,
            locked,
            authorities,
        }
    }

    /// The remote user id.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// The email address of record.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// An identity owned by the directory federation provider.
///
/// The username is an opaque directory identifier; the three eligibility
/// flags are supplied entirely by the upstream directory, with no local
/// derivation.
#[derive(Debug, Clone)]
pub struct DirectoryIdentity {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    enabled: bool,
    account_non_locked: bool,
    credentials_non_expired: bool,
}

impl DirectoryIdentity {
    /// Creates a directory identity.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        enabled: bool,
        account_non_locked: bool,
        credentials_non_expired: bool,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            enabled,
            account_non_locked,
            credentials_non_expired,
        }
    }
}

// ============================================================================
// Identity
// ============================================================================

/// A resolved user identity from one of the four systems of record.
///
/// All variants expose the same capability set, so the security layer
/// never branches on the source.
#[derive(Debug, Clone)]
pub enum Identity {
    /// Owned by the local credential store.
    Local(LocalIdentity),
    /// Owned by the prison management system.
    Prison(PrisonIdentity),
    /// Owned by the probation case management system.
    Probation(ProbationIdentity),
    /// Owned by the directory federation provider.
    Directory(DirectoryIdentity),
}

impl Identity {
    /// The system of record that owns this identity.
    #[must_use]
    pub const fn source(&self) -> AuthSource {
        match self {
            Self::Local(_) => AuthSource::Local,
            Self::Prison(_) => AuthSource::Prison,
            Self::Probation(_) => AuthSource::Probation,
            Self::Directory(_) => AuthSource::Directory,
        }
    }

    /// The username under which this identity authenticates.
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Local(local) => &local.user.username,
            Self::Prison(prison) => &prison.account_detail.username,
            Self::Probation(probation) => &probation.username,
            Self::Directory(directory) => &directory.username,
        }
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Local(local) => local.user.name(),
            Self::Prison(prison) => prison.staff.full_name(),
            Self::Probation(probation) => {
                format!("{} {}", probation.first_name, probation.surname)
            }
            Self::Directory(directory) => {
                format!("{} {}", directory.first_name, directory.last_name)
            }
        }
    }

    /// The canonical email address, if one is known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Local(local) => local.user.email.as_deref(),
            Self::Prison(_) => None,
            Self::Probation(probation) => Some(&probation.email),
            Self::Directory(directory) => Some(&directory.email),
        }
    }

    /// The granted authorities.
    #[must_use]
    pub fn authorities(&self) -> BTreeSet<String> {
        match self {
            Self::Local(local) => local.authorities.clone(),
            Self::Prison(prison) => prison.authorities.clone(),
            Self::Probation(probation) => probation.authorities.clone(),
            Self::Directory(_) => BTreeSet::new(),
        }
    }

    /// Whether the account is enabled for login.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Local(local) => local.user.enabled,
            Self::Prison(prison) => prison.eligibility().enabled,
            Self::Probation(probation) => probation.enabled,
            Self::Directory(directory) => directory.enabled,
        }
    }

    /// Whether the account is not locked.
    #[must_use]
    pub fn is_account_non_locked(&self) -> bool {
        match self {
            Self::Local(_) => true,
            Self::Prison(prison) => prison.eligibility().account_non_locked,
            Self::Probation(probation) => !probation.locked,
            Self::Directory(directory) => directory.account_non_locked,
        }
    }

    /// Whether the credentials are not expired.
    #[must_use]
    pub fn is_credentials_non_expired(&self) -> bool {
        match self {
            Self::Local(_) | Self::Probation(_) => true,
            Self::Prison(prison) => prison.eligibility().credentials_non_expired,
            Self::Directory(directory) => directory.credentials_non_expired,
        }
    }

    /// Whether the account entity itself is not expired.
    ///
    /// Always true: only credentials expire, never the account.
    #[must_use]
    pub const fn is_account_non_expired(&self) -> bool {
        true
    }

    /// Converts this identity into the canonical local user record.
    ///
    /// This conversion is the only path by which a non-local identity is
    /// merged into the local user table. Username and source tag are
    /// always preserved; probation and directory identities are treated
    /// as email-verified because their owning systems vouch for the
    /// address.
    #[must_use]
    pub fn to_user(&self) -> User {
        match self {
            Self::Local(local) => local.user.clone(),
            Self::Prison(prison) => User::new(
                prison.account_detail.username.clone(),
                AuthSource::Prison,
            )
            .with_person(
                prison.staff.first_name.clone(),
                prison.staff.last_name.clone(),
            )
            .with_enabled(prison.eligibility().enabled),
            Self::Probation(probation) => User::new(
                probation.username.clone(),
                AuthSource::Probation,
            )
            .with_email(probation.email.clone())
            .with_verified(true)
            .with_enabled(probation.enabled)
            .with_person(probation.first_name.clone(), probation.surname.clone()),
            Self::Directory(directory) => User::new(
                directory.username.clone(),
                AuthSource::Directory,
            )
            .with_email(directory.email.clone())
            .with_verified(true)
            .with_enabled(directory.enabled)
            .with_person(
                directory.first_name.clone(),
                directory.last_name.clone(),
            ),
        }
    }
}
