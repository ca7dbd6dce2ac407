//! In-memory repository doubles shared by this crate's tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use gatehouse_model::{AuthSource, Staff, StaffAccountDetail, StaffRole, User};

use crate::repository::{RepositoryResult, StaffRepository, UserRepository};

/// In-memory user store keyed by (username, source).
#[derive(Default)]
pub(crate) struct InMemoryUsers {
    users: Mutex<HashMap<(String, AuthSource), User>>,
    authorities: Mutex<HashMap<String, Vec<String>>>,
}

impl InMemoryUsers {
    pub(crate) fn with_user(self, user: User) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert((user.username.clone(), user.source), user);
        self
    }

    pub(crate) fn with_authorities(self, username: &str, authorities: &[&str]) -> Self {
        self.authorities.lock().unwrap().insert(
            username.to_string(),
            authorities.iter().map(ToString::to_string).collect(),
        );
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_username(
        &self,
        username: &str,
        source: AuthSource,
    ) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&(username.to_string(), source))
            .cloned())
    }

    async fn find_all_by_email(
        &self,
        email: &str,
        source: AuthSource,
    ) -> RepositoryResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|user| user.source == source && user.email.as_deref() == Some(email))
            .cloned()
            .collect())
    }

    async fn find_authorities(&self, username: &str) -> RepositoryResult<Vec<String>> {
        Ok(self
            .authorities
            .lock()
            .unwrap()
            .get(username)
            .cloned()
            .unwrap_or_default())
    }
}

/// In-memory staff store keyed by username.
#[derive(Default)]
pub(crate) struct InMemoryStaff {
    accounts: Mutex<HashMap<String, (Staff, StaffAccountDetail, Vec<StaffRole>)>>,
}

impl InMemoryStaff {
    pub(crate) fn with_account(
        self,
        staff: Staff,
        detail: StaffAccountDetail,
        roles: Vec<StaffRole>,
    ) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(detail.username.clone(), (staff, detail, roles));
        self
    }
}

#[async_trait]
impl StaffRepository for InMemoryStaff {
    async fn find_account_detail(
        &self,
        username: &str,
    ) -> RepositoryResult<Option<StaffAccountDetail>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(username)
            .map(|(_, detail, _)| detail.clone()))
    }

    async fn find_staff(&self, username: &str) -> RepositoryResult<Option<Staff>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(username)
            .map(|(staff, _, _)| staff.clone()))
    }

    async fn find_roles(&self, username: &str) -> RepositoryResult<Vec<StaffRole>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(username)
            .map(|(_, _, roles)| roles.clone())
            .unwrap_or_default())
    }
}
