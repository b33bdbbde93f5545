//! Remote content API contract.
//!
//! # Responsibility
//! - Describe the collection/resource calls the remote store depends on.
//! - Keep transport concerns out of reconciliation logic, so the remote
//!   store can run against any implementation (HTTP, or in-process fakes).
//!
//! # Invariants
//! - Implementations unwrap the `data` envelope before returning.
//! - A missing resource surfaces as `RemoteError::Status { status: 404, .. }`.

use crate::model::catalog::{CatalogEntry, CatalogKind, Catalogs, CATALOG_PAGE_SIZE};
use crate::model::employee::EmployeeId;
use crate::repo::wire::{EmployeePage, EmployeePayload};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Network or server failure reported by the content API.
#[derive(Debug)]
pub enum RemoteError {
    Transport(reqwest::Error),
    Status { status: u16, message: String },
    Decode(String),
}

impl RemoteError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "content api transport failure: {err}"),
            Self::Status { status, message } => {
                write!(f, "content api returned {status}: {message}")
            }
            Self::Decode(message) => write!(f, "invalid content api response: {message}"),
        }
    }
}

impl Error for RemoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Decode(value.to_string());
        }
        Self::Transport(value)
    }
}

/// Calls the remote store makes against the content API.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Fetches one 1-based page of the collection with department/position
    /// expanded.
    async fn fetch_employees(&self, page: u32, page_size: u32) -> Result<EmployeePage, RemoteError>;

    /// Creates a record and returns the server-assigned id.
    async fn create_employee(&self, payload: &EmployeePayload) -> Result<EmployeeId, RemoteError>;

    async fn update_employee(
        &self,
        id: &EmployeeId,
        payload: &EmployeePayload,
    ) -> Result<(), RemoteError>;

    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), RemoteError>;

    async fn fetch_catalog(
        &self,
        kind: CatalogKind,
        page_size: u32,
    ) -> Result<Vec<CatalogEntry>, RemoteError>;
}

/// Loads both reference catalogs for the remote form.
pub async fn load_catalogs<A: ContentApi + ?Sized>(api: &A) -> Result<Catalogs, RemoteError> {
    let departments = api
        .fetch_catalog(CatalogKind::Department, CATALOG_PAGE_SIZE)
        .await?;
    let positions = api
        .fetch_catalog(CatalogKind::Position, CATALOG_PAGE_SIZE)
        .await?;
    Ok(Catalogs {
        departments,
        positions,
    })
}
