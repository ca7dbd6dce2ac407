//! Source precedence resolution.
//!
//! Resolves "who is this user" by trying the systems of record in fixed
//! precedence: local, then prison, then probation, then directory. A
//! not-found in one source continues the chain; an unavailable source
//! aborts it, because the type of identity can no longer be determined.

use std::sync::Arc;

use tracing::debug;

use gatehouse_identity::{Identity, LocalIdentity, PrisonIdentity};
use gatehouse_model::AuthSource;

use crate::directory::DirectoryGateway;
use crate::error::{GatewayError, GatewayResult};
use crate::probation::ProbationGateway;
use crate::repository::{RepositoryError, StaffRepository, UserRepository};

/// Resolves usernames to identities across the four systems of record.
///
/// Stateless and safe to share across concurrent authentication
/// requests: every lookup constructs fresh immutable values.
pub struct IdentityResolver {
    users: Arc<dyn UserRepository>,
    staff: Arc<dyn StaffRepository>,
    probation: ProbationGateway,
    directory: DirectoryGateway,
}

impl IdentityResolver {
    /// Creates a resolver over the given collaborators.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        staff: Arc<dyn StaffRepository>,
        probation: ProbationGateway,
        directory: DirectoryGateway,
    ) -> Self {
        Self {
            users,
            staff,
            probation,
            directory,
        }
    }

    /// Resolves one username to an identity, trying sources in
    /// precedence order.
    ///
    /// ## Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if a system of record that
    /// had to be consulted could not answer.
    pub async fn resolve_by_username(&self, username: &str) -> GatewayResult<Option<Identity>> {
        if let Some(local) = self.resolve_local(username).await? {
            return Ok(Some(local));
        }
        if let Some(prison) = self.resolve_prison(username).await? {
            return Ok(Some(prison));
        }
        if let Some(probation) = self.probation.lookup_by_username(username).await? {
            return Ok(Some(Identity::Probation(probation)));
        }
        Ok(self
            .directory
            .lookup_by_username(username)
            .await?
            .map(Identity::Directory))
    }

    /// Resolves all identities holding the given email address.
    ///
    /// Emails are not unique across accounts, so zero or more identities
    /// are returned: local accounts first, then probation matches.
    ///
    /// ## Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if a system of record that
    /// had to be consulted could not answer.
    pub async fn resolve_all_by_email(&self, email: &str) -> GatewayResult<Vec<Identity>> {
        let mut identities = Vec::new();

        for user in self
            .users
            .find_all_by_email(email, AuthSource::Local)
            .await
            .map_err(store_unavailable)?
        {
            let authorities = self
                .users
                .find_authorities(&user.username)
                .await
                .map_err(store_unavailable)?;
            identities.push(Identity::Local(LocalIdentity::new(
                user,
                authorities.into_iter().collect(),
            )));
        }

        for probation in self.probation.lookup_all_by_email(email).await? {
            identities.push(Identity::Probation(probation));
        }

        Ok(identities)
    }

    async fn resolve_local(&self, username: &str) -> GatewayResult<Option<Identity>> {
        let Some(user) = self
            .users
            .find_by_username(username, AuthSource::Local)
            .await
            .map_err(store_unavailable)?
        else {
            debug!(username, "no local account");
            return Ok(None);
        };

        let authorities = self
            .users
            .find_authorities(username)
            .await
            .map_err(store_unavailable)?;

        Ok(Some(Identity::Local(LocalIdentity::new(
            user,
            authorities.into_iter().collect(),
        ))))
    }

    async fn resolve_prison(&self, username: &str) -> GatewayResult<Option<Identity>> {
        let Some(detail) = self
            .staff
            .find_account_detail(username)
            .await
            .map_err(store_unavailable)?
        else {
            debug!(username, "no prison account");
            return Ok(None);
        };

        let Some(staff) = self
            .staff
            .find_staff(username)
            .await
            .map_err(store_unavailable)?
        else {
            debug!(username, "prison account has no staff record");
            return Ok(None);
        };

        let roles = self
            .staff
            .find_roles(username)
            .await
            .map_err(store_unavailable)?;

        Ok(Some(Identity::Prison(PrisonIdentity::new(
            staff, detail, &roles,
        ))))
    }
}

/// A local store that cannot answer blocks identity resolution the same
/// way an unreachable remote does.
fn store_unavailable(err: RepositoryError) -> GatewayError {
    GatewayError::unavailable("local user store", err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use gatehouse_core::config::ProbationConfig;
    use gatehouse_model::{AccountStatus, Staff, StaffAccountDetail, StaffRole, User};

    use crate::testing::{InMemoryStaff, InMemoryUsers};

    fn probation_config(enabled: bool, endpoint_url: &str) -> ProbationConfig {
        ProbationConfig {
            enabled,
            endpoint_url: endpoint_url.to_string(),
            connection_timeout: Duration::from_millis(500),
            read_timeout: Duration::from_secs(2),
            role_mappings: HashMap::new(),
        }
    }

    fn resolver(users: InMemoryUsers, staff: InMemoryStaff, probation_enabled: bool) -> IdentityResolver {
        let users = Arc::new(users);
        let probation = ProbationGateway::new(&probation_config(
            probation_enabled,
            "http://127.0.0.1:1",
        ))
        .unwrap();
        IdentityResolver::new(
            users.clone(),
            Arc::new(staff),
            probation,
            DirectoryGateway::new(users),
        )
    }

    #[tokio::test]
    async fn local_account_wins_precedence() {
        let users = InMemoryUsers::default()
            .with_user(User::new("JSMITH", AuthSource::Local))
            .with_authorities("JSMITH", &["ROLE_MAINTAIN_ACCESS"]);
        let staff = InMemoryStaff::default().with_account(
            Staff::new(1, "Jane", "Smith"),
            StaffAccountDetail::new("JSMITH", AccountStatus::Open),
            vec![],
        );

        let identity = resolver(users, staff, false)
            .resolve_by_username("JSMITH")
            .await
            .unwrap()
            .expect("identity");

        assert_eq!(identity.source(), AuthSource::Local);
        assert!(identity.authorities().contains("ROLE_MAINTAIN_ACCESS"));
    }

    #[tokio::test]
    async fn falls_through_to_prison() {
        let staff = InMemoryStaff::default().with_account(
            Staff::new(1, "Joe", "Bloggs"),
            StaffAccountDetail::new("JBLOGGS_GEN", AccountStatus::Open),
            vec![StaffRole::new("omic-admin", "NWEB")],
        );

        let identity = resolver(InMemoryUsers::default(), staff, false)
            .resolve_by_username("JBLOGGS_GEN")
            .await
            .unwrap()
            .expect("identity");

        assert_eq!(identity.source(), AuthSource::Prison);
        assert!(identity.authorities().contains("ROLE_OMIC_ADMIN"));
    }

    #[tokio::test]
    async fn falls_through_to_directory_when_probation_disabled() {
        let users = InMemoryUsers::default()
            .with_user(User::new("2e285ccd-dcfd", AuthSource::Directory));

        let identity = resolver(users, InMemoryStaff::default(), false)
            .resolve_by_username("2e285ccd-dcfd")
            .await
            .unwrap()
            .expect("identity");

        assert_eq!(identity.source(), AuthSource::Directory);
    }

    #[tokio::test]
    async fn unknown_username_resolves_to_none() {
        let resolved = resolver(InMemoryUsers::default(), InMemoryStaff::default(), false)
            .resolve_by_username("NOBODY")
            .await
            .unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn email_resolution_collects_local_matches() {
        let users = InMemoryUsers::default()
            .with_user(
                User::new("JSMITH", AuthSource::Local).with_email("shared@justice.example"),
            )
            .with_user(
                User::new("JSMITH2", AuthSource::Local).with_email("shared@justice.example"),
            );

        let identities = resolver(users, InMemoryStaff::default(), false)
            .resolve_all_by_email("shared@justice.example")
            .await
            .unwrap();

        assert_eq!(identities.len(), 2);
        assert!(identities
            .iter()
            .all(|identity| identity.source() == AuthSource::Local));
    }

    #[tokio::test]
    async fn probation_outage_aborts_the_chain() {
        // Probation enabled but pointed at an unroutable endpoint: the
        // chain must stop with Unavailable rather than fall through to
        // the directory.
        let users = InMemoryUsers::default()
            .with_user(User::new("NOBODY", AuthSource::Directory));

        let error = resolver(users, InMemoryStaff::default(), true)
            .resolve_by_username("NOBODY")
            .await
            .unwrap_err();
        assert!(error.is_unavailable());
    }
}
