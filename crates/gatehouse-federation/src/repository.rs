//! Repository collaborator traits.
//!
//! Persistence lives behind these traits; they carry only the contract
//! the identity resolution path consumes. Implementations must be
//! thread-safe and support concurrent access.

use async_trait::async_trait;
use thiserror::Error;

use gatehouse_model::{AuthSource, Staff, StaffAccountDetail, StaffRole, User};

/// Errors surfaced by repository collaborators.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store cannot be reached.
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// A query failed.
    #[error("repository query failed: {0}")]
    Query(String),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Store of canonical local user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds one user by username under the given source tag.
    async fn find_by_username(
        &self,
        username: &str,
        source: AuthSource,
    ) -> RepositoryResult<Option<User>>;

    /// Finds all users holding the given email under the given source tag.
    async fn find_all_by_email(
        &self,
        email: &str,
        source: AuthSource,
    ) -> RepositoryResult<Vec<User>>;

    /// Gets the authority records assigned to a local user.
    async fn find_authorities(&self, username: &str) -> RepositoryResult<Vec<String>>;
}

/// Store of prison staff records.
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Finds the account detail for a prison username.
    async fn find_account_detail(
        &self,
        username: &str,
    ) -> RepositoryResult<Option<StaffAccountDetail>>;

    /// Finds the staff record owning a prison username.
    async fn find_staff(&self, username: &str) -> RepositoryResult<Option<Staff>>;

    /// Finds the caseload-scoped role assignments for a prison username.
    async fn find_roles(&self, username: &str) -> RepositoryResult<Vec<StaffRole>>;
}
