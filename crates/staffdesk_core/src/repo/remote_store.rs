//! Record store proxying the remote content API.
//!
//! # Responsibility
//! - Send every mutation to the content API.
//! - Resynchronize the whole collection after each acknowledged mutation.
//!
//! # Invariants
//! - The snapshot is replaced wholesale, and only from a successful fetch.
//! - A failed mutation or fetch leaves the snapshot at its last confirmed
//!   state, so aggregates never see optimistic data.
//! - Mutation targets are resolved against the confirmed snapshot.
//! - A resync reads every page the server reports, never just the first.

use crate::model::employee::{Employee, EmployeeFields, EmployeeId};
use crate::model::validation::ValidationProfile;
use crate::repo::content_api::{ContentApi, RemoteError};
use crate::repo::employee_store::{EmployeeStore, Snapshot, StoreError, StoreResult};
use crate::repo::wire::{EmployeePayload, EmployeeResource};
use async_trait::async_trait;
use log::{error, info, warn};
use std::collections::HashSet;
use std::time::Instant;

/// Default collection page size requested from the content API.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Record store backed by a `ContentApi`.
pub struct RemoteEmployeeStore<A: ContentApi> {
    api: A,
    profile: ValidationProfile,
    page_size: u32,
    snapshot: Snapshot,
}

impl<A: ContentApi> RemoteEmployeeStore<A> {
    pub fn new(api: A, profile: ValidationProfile) -> Self {
        Self {
            api,
            profile,
            page_size: DEFAULT_PAGE_SIZE,
            snapshot: Snapshot::from(Vec::new()),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Re-fetches every page of the collection and replaces the snapshot.
    ///
    /// # Errors
    /// - `Remote` when any page fails or the pages carry duplicate ids. The
    ///   previous snapshot is kept in both cases.
    pub async fn resync(&mut self) -> StoreResult<Snapshot> {
        let started_at = Instant::now();
        let fetched = match self.fetch_all().await {
            Ok(resources) => resources,
            Err(err) => {
                error!(
                    "event=employee_resync module=repo status=error mode=remote duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        let records: Vec<Employee> = fetched.into_iter().map(Employee::from).collect();
        let duplicate = {
            let mut seen = HashSet::with_capacity(records.len());
            records
                .iter()
                .find(|record| !seen.insert(&record.id))
                .map(|record| record.id.clone())
        };
        if let Some(id) = duplicate {
            error!(
                "event=employee_resync module=repo status=error mode=remote error_code=duplicate_id id={id}"
            );
            return Err(RemoteError::Decode(format!("duplicate employee id `{id}`")).into());
        }

        self.snapshot = Snapshot::from(records);
        info!(
            "event=employee_resync module=repo status=ok mode=remote count={} duration_ms={}",
            self.snapshot.len(),
            started_at.elapsed().as_millis()
        );
        Ok(self.snapshot.clone())
    }

    /// Walks pages `1..=page_count` as reported by the first response.
    async fn fetch_all(&self) -> Result<Vec<EmployeeResource>, RemoteError> {
        let mut resources = Vec::new();
        let mut page = 1;
        loop {
            let fetched = self.api.fetch_employees(page, self.page_size).await?;
            resources.extend(fetched.records);
            if page >= fetched.page_count {
                return Ok(resources);
            }
            page += 1;
        }
    }

    fn confirmed(&self, id: &EmployeeId) -> StoreResult<&Employee> {
        self.snapshot
            .iter()
            .find(|employee| &employee.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn resync_and_find(&mut self, id: &EmployeeId) -> StoreResult<Employee> {
        let snapshot = self.resync().await?;
        snapshot
            .iter()
            .find(|employee| &employee.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

fn mutation_error(operation: &str, id: Option<&EmployeeId>, err: RemoteError) -> StoreError {
    match id {
        Some(id) if err.is_not_found() => {
            warn!(
                "event=employee_{operation} module=repo status=not_found mode=remote id={id}"
            );
            StoreError::NotFound(id.clone())
        }
        _ => {
            error!("event=employee_{operation} module=repo status=error mode=remote error={err}");
            StoreError::Remote(err)
        }
    }
}

#[async_trait]
impl<A: ContentApi> EmployeeStore for RemoteEmployeeStore<A> {
    fn mode(&self) -> &'static str {
        "remote"
    }

    fn profile(&self) -> ValidationProfile {
        self.profile
    }

    fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    async fn list(&mut self) -> StoreResult<Vec<Employee>> {
        Ok(self.resync().await?.to_vec())
    }

    async fn create(&mut self, fields: EmployeeFields) -> StoreResult<Employee> {
        self.profile.validate(&fields)?;
        if fields.profile_image.is_some() {
            warn!("event=employee_create module=repo status=skipped mode=remote reason=image_not_supported");
        }

        let payload = EmployeePayload::from_fields(&fields, self.profile);
        let id = self
            .api
            .create_employee(&payload)
            .await
            .map_err(|err| mutation_error("create", None, err))?;
        info!("event=employee_create module=repo status=acknowledged mode=remote id={id}");

        // Acknowledged creates never report NotFound, even if the record was
        // removed before the resync ran.
        let snapshot = self.resync().await?;
        match snapshot.iter().find(|employee| employee.id == id) {
            Some(employee) => Ok(employee.clone()),
            None => {
                warn!(
                    "event=employee_create module=repo status=missing_after_resync mode=remote id={id}"
                );
                Ok(Employee::from_fields(id, &fields, self.profile))
            }
        }
    }

    async fn update(&mut self, id: &EmployeeId, fields: EmployeeFields) -> StoreResult<Employee> {
        let merged = fields.overlay(self.confirmed(id)?.to_fields());
        self.profile.validate(&merged)?;

        let payload = EmployeePayload::from_fields(&merged, self.profile);
        self.api
            .update_employee(id, &payload)
            .await
            .map_err(|err| mutation_error("update", Some(id), err))?;
        info!("event=employee_update module=repo status=acknowledged mode=remote id={id}");

        self.resync_and_find(id).await
    }

    async fn remove(&mut self, id: &EmployeeId) -> StoreResult<()> {
        self.confirmed(id)?;

        self.api
            .delete_employee(id)
            .await
            .map_err(|err| mutation_error("remove", Some(id), err))?;
        info!("event=employee_remove module=repo status=acknowledged mode=remote id={id}");

        self.resync().await?;
        Ok(())
    }
}
