//! Record store contract shared by local and remote modes.

use crate::model::employee::{Employee, EmployeeFields, EmployeeId};
use crate::model::validation::{ValidationError, ValidationProfile};
use crate::repo::content_api::RemoteError;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Immutable copy of the last confirmed collection.
pub type Snapshot = Arc<[Employee]>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for record reads and mutations.
#[derive(Debug)]
pub enum StoreError {
    /// Candidate is missing a required field or carries a malformed value.
    Validation(ValidationError),
    /// Mutation target does not exist.
    NotFound(EmployeeId),
    /// Network or server failure. The snapshot keeps its last confirmed state.
    Remote(RemoteError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::Remote(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Remote(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RemoteError> for StoreError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

/// Authoritative owner of the employee collection.
///
/// Implementations are selected at composition time; callers never branch
/// on the storage mode. Mutations take `&mut self`, so one store instance
/// never runs two mutations at once (see `SharedStore` for queued shared
/// access).
#[async_trait]
pub trait EmployeeStore: Send {
    /// Short mode name used in log events.
    fn mode(&self) -> &'static str;

    fn profile(&self) -> ValidationProfile;

    /// Last confirmed collection. Never performs I/O.
    fn snapshot(&self) -> Snapshot;

    /// Returns the current ordered collection.
    async fn list(&mut self) -> StoreResult<Vec<Employee>>;

    /// Validates and appends a new record with a fresh id.
    async fn create(&mut self, fields: EmployeeFields) -> StoreResult<Employee>;

    /// Shallow-merges `fields` onto the record with `id`.
    async fn update(&mut self, id: &EmployeeId, fields: EmployeeFields) -> StoreResult<Employee>;

    /// Removes the record with `id`. Callers check confirmation first.
    async fn remove(&mut self, id: &EmployeeId) -> StoreResult<()>;
}
