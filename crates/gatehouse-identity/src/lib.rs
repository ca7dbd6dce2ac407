//! # gatehouse-identity
//!
//! The polymorphic identity abstraction at the heart of Gatehouse.
//!
//! One identity variant exists per system of record (local, prison,
//! probation, directory). Every variant exposes the same capability set:
//! credentials, granted authorities, display identity, enablement, and a
//! conversion into the canonical local user record. The security layer
//! sees one uniform contract regardless of which backing system
//! authenticated the user.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod authority;
pub mod eligibility;
pub mod identity;

pub use authority::{prison_authorities, RoleMappings};
pub use eligibility::LoginEligibility;
pub use identity::{
    DirectoryIdentity, Identity, LocalIdentity, PrisonIdentity, ProbationIdentity,
};
