//! # gatehouse-model
//!
//! Domain model for Gatehouse.
//!
//! Defines the canonical user record that every identity source converts
//! into, the account status enumeration that gates login eligibility, and
//! the prison staff records wrapped by prison identities.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod account_status;
pub mod staff;
pub mod user;

pub use account_status::AccountStatus;
pub use staff::{Staff, StaffAccountDetail, StaffRole};
pub use user::{AuthSource, Person, User};
