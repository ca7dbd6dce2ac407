//! Wire types for the remote probation service.
//!
//! The wire encoding is an external contract (camelCase JSON); transport
//! framing belongs to the HTTP client collaborator. Payload translation
//! into identity variants is kept as a pure function so it is testable
//! without HTTP.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_identity::{ProbationIdentity, RoleMappings};

/// User details as the probation service returns them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    /// Remote user id.
    pub user_id: Uuid,
    /// Username, in whatever case the remote system holds it.
    pub username: String,
    /// Surname.
    pub surname: String,
    /// First name.
    pub first_name: String,
    /// Email address, in whatever case the remote system holds it.
    pub email: String,
    /// Whether the remote account is enabled.
    pub enabled: bool,
    /// Role assignments, by remote role name.
    #[serde(default)]
    pub roles: Vec<UserRole>,
}

/// One remote role assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRole {
    /// Remote role name.
    pub name: String,
}

/// Authentication request body.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    /// Username to authenticate.
    pub username: &'a str,
    /// Presented password.
    pub password: &'a str,
}

/// Password change request body.
#[derive(Debug, Serialize)]
pub struct PasswordChangeRequest<'a> {
    /// New password.
    pub password: &'a str,
}

/// Translates a remote payload into a probation identity.
///
/// Canonicalization contract: the remote username is uppercased and the
/// email lowercased. Role names are resolved through the configured
/// mapping table.
#[must_use]
pub fn map_user_details(details: UserDetails, mappings: &RoleMappings) -> ProbationIdentity {
    let role_names: Vec<String> = details.roles.into_iter().map(|role| role.name).collect();
    let authorities = mappings.map_roles(&role_names);

    ProbationIdentity::new(
        details.username.to_uppercase(),
        details.user_id,
        details.first_name,
        details.surname,
        details.email.to_lowercase(),
        details.enabled,
        false,
        authorities,
    )
}
