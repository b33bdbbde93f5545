//! Record store contracts and their local/remote implementations.
//!
//! # Responsibility
//! - Define the `EmployeeStore` capability set (list/create/update/remove).
//! - Provide an in-memory store and a store proxying the remote content API.
//! - Keep wire envelope details inside the remote boundary.
//!
//! # Invariants
//! - Write paths validate before mutating or sending anything.
//! - Stores return semantic errors (`NotFound`) in addition to transport
//!   errors.
//! - The snapshot only ever holds confirmed state.

pub mod content_api;
pub mod employee_store;
pub mod http_api;
pub mod local_store;
pub mod object_urls;
pub mod remote_store;
pub mod shared_store;
pub mod wire;
