//! Console use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the operations the console exposes.
//! - Stage and validate form input before it reaches a store.
//! - Gate destructive actions behind explicit confirmation.
//!
//! # Invariants
//! - Services never bypass store validation or mutate a collection directly.
//! - Services stay storage-agnostic: the store is a generic parameter.

pub mod employee_service;
pub mod form_controller;
