//! Account status enumeration.
//!
//! Each status is a fixed, hand-enumerated combination of four facets
//! (expired, grace period, locked, user-locked) carried by the prison
//! system of record. Numeric codes are stable, persisted, and never
//! reused; descriptions are unique.

use serde::{Deserialize, Serialize};

/// Account eligibility status.
///
/// `user_locked` means locked by repeated bad credential attempts (a
/// timed lock), as opposed to an administrative lock; it is always a
/// subset of `locked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Account is open.
    Open,
    /// Credentials have expired.
    Expired,
    /// Credentials have expired but the grace window still permits login.
    ExpiredGrace,
    /// Locked by repeated bad credential attempts.
    LockedTimed,
    /// Credentials expired and locked by repeated bad credential attempts.
    ExpiredLockedTimed,
    /// Credentials expired within the grace window and locked by repeated
    /// bad credential attempts.
    ExpiredGraceLockedTimed,
    /// Locked administratively.
    Locked,
    /// Credentials expired and locked administratively.
    ExpiredLocked,
    /// Credentials expired within the grace window and locked
    /// administratively.
    ExpiredGraceLocked,
}

impl AccountStatus {
    /// All status values, in code order.
    pub const ALL: [Self; 9] = [
        Self::Open,
        Self::Expired,
        Self::ExpiredGrace,
        Self::LockedTimed,
        Self::ExpiredLockedTimed,
        Self::ExpiredGraceLockedTimed,
        Self::Locked,
        Self::ExpiredLocked,
        Self::ExpiredGraceLocked,
    ];

    /// Returns the stable numeric code for this status.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Expired => 1,
            Self::ExpiredGrace => 2,
            Self::LockedTimed => 4,
            Self::ExpiredLockedTimed => 5,
            Self::ExpiredGraceLockedTimed => 6,
            Self::Locked => 8,
            Self::ExpiredLocked => 9,
            Self::ExpiredGraceLocked => 10,
        }
    }

    /// Returns the human description for this status.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Expired => "EXPIRED",
            Self::ExpiredGrace => "EXPIRED(GRACE)",
            Self::LockedTimed => "LOCKED(TIMED)",
            Self::ExpiredLockedTimed => "EXPIRED & LOCKED(TIMED)",
            Self::ExpiredGraceLockedTimed => "EXPIRED(GRACE) & LOCKED(TIMED)",
            Self::Locked => "LOCKED",
            Self::ExpiredLocked => "EXPIRED & LOCKED",
            Self::ExpiredGraceLocked => "EXPIRED(GRACE) & LOCKED",
        }
    }

    /// Looks up a status by its numeric code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Looks up a status by its description string.
    #[must_use]
    pub fn from_description(description: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.description() == description)
    }

    /// Returns true if credentials have expired (including grace).
    #[must_use]
    pub const fn is_expired(self) -> bool {
        !matches!(self, Self::Open | Self::LockedTimed | Self::Locked)
    }

    /// Returns true if the expiry grace window applies.
    #[must_use]
    pub const fn is_grace_period(self) -> bool {
        matches!(
            self,
            Self::ExpiredGrace | Self::ExpiredGraceLockedTimed | Self::ExpiredGraceLocked
        )
    }

    /// Returns true if the account is locked in any way.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        !matches!(self, Self::Open | Self::Expired | Self::ExpiredGrace)
    }

    /// Returns true if the account was locked by repeated bad credential
    /// attempts.
    #[must_use]
    pub const fn is_user_locked(self) -> bool {
        matches!(
            self,
            Self::LockedTimed | Self::ExpiredLockedTimed | Self::ExpiredGraceLockedTimed
        )
    }

    /// Returns true for the statuses that do not count as locked for
    /// login purposes.
    ///
    /// These are the only statuses under which a login can proceed:
    /// open, expired, and expired within the grace window.
    #[must_use]
    pub const fn is_open_like(self) -> bool {
        matches!(self, Self::Open | Self::Expired | Self::ExpiredGrace)
    }

    /// Returns true if credentials count as expired for login purposes.
    ///
    /// Grace-period expiry does not count: a user in the grace window may
    /// still log in with their old credentials.
    #[must_use]
    pub const fn is_credential_expired(self) -> bool {
        matches!(
            self,
            Self::Expired | Self::ExpiredLocked | Self::ExpiredLockedTimed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_lookup_round_trips_every_status() {
        for status in AccountStatus::ALL {
            assert_eq!(AccountStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn description_lookup_round_trips_every_status() {
        for status in AccountStatus::ALL {
            assert_eq!(
                AccountStatus::from_description(status.description()),
                Some(status)
            );
        }
    }

    #[test]
    fn codes_are_unique() {
        for status in AccountStatus::ALL {
            let matches = AccountStatus::ALL
                .iter()
                .filter(|other| other.code() == status.code())
                .count();
            assert_eq!(matches, 1, "duplicate code {}", status.code());
        }
    }

    #[test]
    fn unknown_code_and_description_are_not_found() {
        assert_eq!(AccountStatus::from_code(3), None);
        assert_eq!(AccountStatus::from_code(99), None);
        assert_eq!(AccountStatus::from_description("SUSPENDED"), None);
    }

    #[test]
    fn open_like_statuses() {
        assert!(AccountStatus::Open.is_open_like());
        assert!(AccountStatus::Expired.is_open_like());
        assert!(AccountStatus::ExpiredGrace.is_open_like());

        assert!(!AccountStatus::Locked.is_open_like());
        assert!(!AccountStatus::LockedTimed.is_open_like());
        assert!(!AccountStatus::ExpiredLocked.is_open_like());
        assert!(!AccountStatus::ExpiredLockedTimed.is_open_like());
        assert!(!AccountStatus::ExpiredGraceLocked.is_open_like());
        assert!(!AccountStatus::ExpiredGraceLockedTimed.is_open_like());
    }

    #[test]
    fn credential_expiry_excludes_grace() {
        assert!(AccountStatus::Expired.is_credential_expired());
        assert!(AccountStatus::ExpiredLocked.is_credential_expired());
        assert!(AccountStatus::ExpiredLockedTimed.is_credential_expired());

        assert!(!AccountStatus::Open.is_credential_expired());
        assert!(!AccountStatus::ExpiredGrace.is_credential_expired());
        assert!(!AccountStatus::ExpiredGraceLocked.is_credential_expired());
        assert!(!AccountStatus::ExpiredGraceLockedTimed.is_credential_expired());
    }

    #[test]
    fn user_locked_is_subset_of_locked() {
        for status in AccountStatus::ALL {
            if status.is_user_locked() {
                assert!(status.is_locked(), "{status:?} user-locked but not locked");
            }
        }
    }

    #[test]
    fn grace_period_is_subset_of_expired() {
        for status in AccountStatus::ALL {
            if status.is_grace_period() {
                assert!(status.is_expired(), "{status:?} in grace but not expired");
            }
        }
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&AccountStatus::ExpiredGrace).unwrap(),
            "\"EXPIRED_GRACE\""
        );
    }
}
