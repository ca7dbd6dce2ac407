//! Prison staff records.
//!
//! These are the records the prison system of record holds for one staff
//! member: the staff profile, the account detail carrying status and
//! credential expiry, and role assignments scoped to a work context
//! (caseload).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account_status::AccountStatus;

/// Staff member status value meaning the member is active.
const STAFF_STATUS_ACTIVE: &str = "ACTIVE";

/// A prison staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    /// Staff identifier in the prison system.
    pub staff_id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Staff status (e.g. `ACTIVE`).
    pub status: String,
}

impl Staff {
    /// Creates a new active staff member.
    #[must_use]
    pub fn new(staff_id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            staff_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            status: STAFF_STATUS_ACTIVE.to_string(),
        }
    }

    /// Sets the staff status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Returns true if the staff member is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == STAFF_STATUS_ACTIVE
    }

    /// Gets the staff member's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Account detail for one prison staff username.
///
/// A staff member may hold more than one account; each account carries
/// its own status and credential expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffAccountDetail {
    /// Account username.
    pub username: String,
    /// Current account status.
    pub account_status: AccountStatus,
    /// When the account's password expires, if an expiry is set.
    pub password_expiry: Option<DateTime<Utc>>,
    /// Account profile (e.g. `TAG_GENERAL`).
    pub profile: Option<String>,
}

impl StaffAccountDetail {
    /// Creates a new open account detail.
    #[must_use]
    pub fn new(username: impl Into<String>, account_status: AccountStatus) -> Self {
        Self {
            username: username.into(),
            account_status,
            password_expiry: None,
            profile: None,
        }
    }

    /// Sets the password expiry timestamp.
    #[must_use]
    pub const fn with_password_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.password_expiry = Some(expiry);
        self
    }

    /// Sets the account profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}

/// A role assignment scoped to a work context (caseload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRole {
    /// Role code, as the prison system records it (e.g. `OMIC_ADMIN`).
    pub role_code: String,
    /// Caseload under which the assignment is active (e.g. `NWEB`).
    pub caseload_id: String,
}

impl StaffRole {
    /// Creates a new role assignment.
    #[must_use]
    pub fn new(role_code: impl Into<String>, caseload_id: impl Into<String>) -> Self {
        Self {
            role_code: role_code.into(),
            caseload_id: caseload_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_staff_is_active() {
        let staff = Staff::new(42, "Jane", "Smith");
        assert!(staff.is_active());
        assert_eq!(staff.full_name(), "Jane Smith");
    }

    #[test]
    fn inactive_staff() {
        let staff = Staff::new(42, "Jane", "Smith").with_status("INACTIVE");
        assert!(!staff.is_active());
    }

    #[test]
    fn account_detail_builder() {
        let expiry = Utc::now();
        let detail = StaffAccountDetail::new("JSMITH_GEN", AccountStatus::Open)
            .with_password_expiry(expiry)
            .with_profile("TAG_GENERAL");

        assert_eq!(detail.username, "JSMITH_GEN");
        assert_eq!(detail.password_expiry, Some(expiry));
        assert_eq!(detail.profile.as_deref(), Some("TAG_GENERAL"));
    }
}
