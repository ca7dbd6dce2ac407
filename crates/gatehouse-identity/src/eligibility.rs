//! Login eligibility for prison accounts.
//!
//! Eligibility is a pure function of (account status, password expiry,
//! evaluation time). Nothing is stored: the flags are recomputed on every
//! access, so this is a combinational state machine rather than a stored
//! one.

use chrono::{DateTime, Utc};
use gatehouse_model::AccountStatus;

/// The four eligibility flags the security layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginEligibility {
    /// Whether the account is enabled for login.
    pub enabled: bool,
    /// Whether the account is not locked.
    pub account_non_locked: bool,
    /// Whether the credentials are not expired.
    pub credentials_non_expired: bool,
    /// Whether the account entity itself is not expired.
    pub account_non_expired: bool,
}

impl LoginEligibility {
    /// Evaluates eligibility for the given status and expiry at `now`.
    ///
    /// The open-like statuses are the only enabled, non-locked ones.
    /// Credentials count as expired when the status says so, or when a
    /// password expiry timestamp exists and is not strictly in the
    /// future. The account entity itself never expires; only credentials
    /// do.
    #[must_use]
    pub fn evaluate(
        status: AccountStatus,
        password_expiry: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let open_like = status.is_open_like();
        let credentials_non_expired = !status.is_credential_expired()
            && password_expiry.is_none_or(|expiry| expiry > now);

        Self {
            enabled: open_like,
            account_non_locked: open_like,
            credentials_non_expired,
            account_non_expired: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn open_account_without_expiry_is_fully_eligible() {
        let now = Utc::now();
        let eligibility = LoginEligibility::evaluate(AccountStatus::Open, None, now);

        assert!(eligibility.enabled);
        assert!(eligibility.account_non_locked);
        assert!(eligibility.credentials_non_expired);
        assert!(eligibility.account_non_expired);
    }

    #[test]
    fn open_account_with_future_expiry_has_valid_credentials() {
        let now = Utc::now();
        let eligibility =
            LoginEligibility::evaluate(AccountStatus::Open, Some(now + Duration::days(30)), now);
        assert!(eligibility.credentials_non_expired);
    }

    #[test]
    fn open_account_with_past_expiry_has_expired_credentials() {
        let now = Utc::now();
        let eligibility =
            LoginEligibility::evaluate(AccountStatus::Open, Some(now - Duration::hours(1)), now);
        assert!(!eligibility.credentials_non_expired);
        assert!(eligibility.enabled);
    }

    #[test]
    fn expiry_exactly_now_counts_as_expired() {
        let now = Utc::now();
        let eligibility = LoginEligibility::evaluate(AccountStatus::Open, Some(now), now);
        assert!(!eligibility.credentials_non_expired);
    }

    #[test]
    fn expired_statuses_override_any_expiry_timestamp() {
        let now = Utc::now();
        let future = Some(now + Duration::days(30));

        for status in [
            AccountStatus::Expired,
            AccountStatus::ExpiredLocked,
            AccountStatus::ExpiredLockedTimed,
        ] {
            let eligibility = LoginEligibility::evaluate(status, future, now);
            assert!(
                !eligibility.credentials_non_expired,
                "{status:?} should have expired credentials"
            );
        }
    }

    #[test]
    fn grace_period_keeps_credentials_valid() {
        let now = Utc::now();
        let eligibility = LoginEligibility::evaluate(AccountStatus::ExpiredGrace, None, now);
        assert!(eligibility.credentials_non_expired);
        assert!(eligibility.enabled);
    }

    #[test]
    fn locked_statuses_disable_login() {
        let now = Utc::now();
        for status in [
            AccountStatus::Locked,
            AccountStatus::LockedTimed,
            AccountStatus::ExpiredLocked,
            AccountStatus::ExpiredGraceLockedTimed,
        ] {
            let eligibility = LoginEligibility::evaluate(status, None, now);
            assert!(!eligibility.enabled, "{status:?} should not be enabled");
            assert!(
                !eligibility.account_non_locked,
                "{status:?} should count as locked"
            );
        }
    }

    #[test]
    fn account_entity_never_expires() {
        let now = Utc::now();
        for status in AccountStatus::ALL {
            let eligibility =
                LoginEligibility::evaluate(status, Some(now - Duration::days(365)), now);
            assert!(eligibility.account_non_expired);
        }
    }
}
