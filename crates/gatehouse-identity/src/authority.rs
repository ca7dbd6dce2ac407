//! Authority derivation per identity source.
//!
//! Authorities are the permission strings granted to a user. Each source
//! derives them differently: the prison system from caseload-scoped role
//! assignments, the probation system through a configurable name-mapping
//! table. Both append a fixed baseline authority identifying the source.

use std::collections::{BTreeSet, HashMap};

use gatehouse_model::StaffRole;

/// Prefix applied to every granted authority.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Work context under which prison web role assignments are active.
pub const PRIMARY_WEB_CASELOAD: &str = "NWEB";

/// Baseline authority granted to every prison user.
pub const PRISON_BASELINE_AUTHORITY: &str = "ROLE_PRISON";

/// Baseline authority granted to every probation user.
pub const PROBATION_BASELINE_AUTHORITY: &str = "ROLE_PROBATION";

/// Derives the authorities granted to a prison user.
///
/// Only assignments under the primary web caseload count. Role codes are
/// normalized (`-` replaced with `_`, uppercased) and prefixed, and the
/// prison baseline authority is always included.
#[must_use]
pub fn prison_authorities(roles: &[StaffRole]) -> BTreeSet<String> {
    let mut authorities: BTreeSet<String> = roles
        .iter()
        .filter(|role| role.caseload_id == PRIMARY_WEB_CASELOAD)
        .map(|role| {
            format!(
                "{ROLE_PREFIX}{}",
                role.role_code.replace('-', "_").to_uppercase()
            )
        })
        .collect();
    authorities.insert(PRISON_BASELINE_AUTHORITY.to_string());
    authorities
}

/// Immutable mapping from remote probation role names to local authority
/// names.
///
/// Built once from configuration at process start and passed explicitly
/// into the gateway; keys are normalized at load time so lookups are
/// exact string matches.
#[derive(Debug, Clone, Default)]
pub struct RoleMappings {
    map: HashMap<String, Vec<String>>,
}

impl RoleMappings {
    /// Builds the mapping table from raw configuration.
    ///
    /// Keys are uppercased with `.` replaced by `_`; values are carried
    /// through unchanged.
    #[must_use]
    pub fn from_config(raw: &HashMap<String, Vec<String>>) -> Self {
        let map = raw
            .iter()
            .map(|(key, values)| {
                (key.replace('.', "_").to_uppercase(), values.clone())
            })
            .collect();
        Self { map }
    }

    /// An empty mapping table.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derives the authorities granted to a probation user.
    ///
    /// Remote role names with no mapping are silently dropped; the
    /// probation baseline authority is always included, so an empty role
    /// list yields exactly the baseline.
    #[must_use]
    pub fn map_roles(&self, remote_roles: &[String]) -> BTreeSet<String> {
        let mut authorities: BTreeSet<String> = remote_roles
            .iter()
            .filter_map(|name| self.map.get(name))
            .flatten()
            .cloned()
            .collect();
        authorities.insert(PROBATION_BASELINE_AUTHORITY.to_string());
        authorities
    }
}
