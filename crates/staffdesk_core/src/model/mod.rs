//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record shared by local and remote stores.
//! - Define reference catalog entries and transient profile image types.
//! - Hold the required-field rules every write path applies.
//!
//! # Invariants
//! - Every record is identified by an `EmployeeId` unique within its store.
//! - A record accepted by a store satisfies the store's `ValidationProfile`.

pub mod catalog;
pub mod employee;
pub mod image;
pub mod validation;
