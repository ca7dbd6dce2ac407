//! Directory identity gateway.
//!
//! Unlike the probation gateway this performs no network I/O: directory
//! users are provisioned into the local user store ahead of time, and the
//! gateway queries that replica keyed by username under the directory
//! source tag.

use std::sync::Arc;

use tracing::debug;

use gatehouse_identity::DirectoryIdentity;
use gatehouse_model::{AuthSource, User};

use crate::error::{GatewayError, GatewayResult};
use crate::repository::UserRepository;

/// Gateway to previously-provisioned directory-sourced user records.
pub struct DirectoryGateway {
    users: Arc<dyn UserRepository>,
}

impl DirectoryGateway {
    /// Creates a gateway over the local user store.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Looks up a directory user by its opaque directory identifier.
    ///
    /// Returns `None` if no record exists for that username under the
    /// directory source tag.
    ///
    /// ## Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if the local store cannot be
    /// queried.
    pub async fn lookup_by_username(
        &self,
        username: &str,
    ) -> GatewayResult<Option<DirectoryIdentity>> {
        let record = self
            .users
            .find_by_username(username, AuthSource::Directory)
            .await
            .map_err(|err| GatewayError::unavailable("directory user store", err.to_string()))?;

        if record.is_none() {
            debug!(username, "no provisioned directory record");
        }
        Ok(record.as_ref().map(to_identity))
    }
}

/// Maps a provisioned record into a directory identity.
///
/// The eligibility flags come from the replicated record: the upstream
/// directory disables accounts rather than locking or expiring them, so
/// the non-locked and non-expired flags are fixed true by the
/// provisioning contract.
fn to_identity(record: &User) -> DirectoryIdentity {
    let (first_name, last_name) = record
        .person
        .as_ref()
        .map(|person| (person.first_name.clone(), person.last_name.clone()))
        .unwrap_or_default();

    DirectoryIdentity::new(
        record.username.clone(),
        first_name,
        last_name,
        record.email.clone().unwrap_or_default(),
        record.enabled,
        true,
        true,
    )
}
