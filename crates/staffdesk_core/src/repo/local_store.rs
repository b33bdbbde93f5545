//! In-memory record store for local-only mode.
//!
//! # Responsibility
//! - Hold the full collection with no remote persistence.
//! - Generate record ids locally.
//! - Own the object references issued for profile images.
//!
//! # Invariants
//! - Records keep insertion order.
//! - Ids are strictly increasing millisecond-derived tokens, so they stay
//!   unique even when several records are created within one millisecond.
//! - An image handle is revoked when its record's image is replaced or the
//!   record is removed.

use crate::model::employee::{Employee, EmployeeFields, EmployeeId};
use crate::model::image::{ImageFile, ImageHandle};
use crate::model::validation::ValidationProfile;
use crate::repo::employee_store::{EmployeeStore, Snapshot, StoreError, StoreResult};
use crate::repo::object_urls::ObjectUrlRegistry;
use async_trait::async_trait;
use chrono::Utc;
use log::info;

/// Record store holding the collection in process memory.
#[derive(Debug, Default)]
pub struct LocalEmployeeStore {
    profile: ValidationProfile,
    records: Vec<Employee>,
    last_id: u64,
    images: ObjectUrlRegistry,
}

impl LocalEmployeeStore {
    pub fn new(profile: ValidationProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    /// Number of image handles still live.
    pub fn live_images(&self) -> usize {
        self.images.len()
    }

    pub fn resolve_image(&self, handle: &ImageHandle) -> Option<&ImageFile> {
        self.images.resolve(handle)
    }

    /// Validates and appends a record.
    pub fn insert(&mut self, mut fields: EmployeeFields) -> StoreResult<Employee> {
        self.profile.validate(&fields)?;

        let id = self.next_id();
        let mut employee = Employee::from_fields(id, &fields, self.profile);
        employee.profile_image = fields.profile_image.take().map(|file| self.images.create(file));
        self.records.push(employee.clone());

        info!(
            "event=employee_create module=repo status=ok mode=local id={} total={}",
            employee.id,
            self.records.len()
        );
        Ok(employee)
    }

    /// Shallow-merges `fields` onto an existing record.
    ///
    /// A supplied image replaces (and revokes) the previous one; an omitted
    /// image keeps it.
    pub fn merge(&mut self, id: &EmployeeId, mut fields: EmployeeFields) -> StoreResult<Employee> {
        let index = self
            .index_of(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let upload = fields.profile_image.take();
        let merged = fields.overlay(self.records[index].to_fields());
        self.profile.validate(&merged)?;

        let previous_image = self.records[index].profile_image.clone();
        let mut updated = Employee::from_fields(id.clone(), &merged, self.profile);
        updated.profile_image = match upload {
            Some(file) => {
                if let Some(handle) = previous_image.as_ref() {
                    self.images.revoke(handle);
                }
                Some(self.images.create(file))
            }
            None => previous_image,
        };
        self.records[index] = updated.clone();

        info!("event=employee_update module=repo status=ok mode=local id={id}");
        Ok(updated)
    }

    /// Removes a record and releases its image handle.
    pub fn delete(&mut self, id: &EmployeeId) -> StoreResult<()> {
        let index = self
            .index_of(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let removed = self.records.remove(index);
        if let Some(handle) = removed.profile_image.as_ref() {
            self.images.revoke(handle);
        }

        info!(
            "event=employee_remove module=repo status=ok mode=local id={} total={}",
            id,
            self.records.len()
        );
        Ok(())
    }

    fn index_of(&self, id: &EmployeeId) -> Option<usize> {
        self.records.iter().position(|employee| &employee.id == id)
    }

    fn next_id(&mut self) -> EmployeeId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let next = now.max(self.last_id + 1);
        self.last_id = next;
        EmployeeId::from(next)
    }
}

#[async_trait]
impl EmployeeStore for LocalEmployeeStore {
    fn mode(&self) -> &'static str {
        "local"
    }

    fn profile(&self) -> ValidationProfile {
        self.profile
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from(self.records.clone())
    }

    async fn list(&mut self) -> StoreResult<Vec<Employee>> {
        Ok(self.records.clone())
    }

    async fn create(&mut self, fields: EmployeeFields) -> StoreResult<Employee> {
        self.insert(fields)
    }

    async fn update(&mut self, id: &EmployeeId, fields: EmployeeFields) -> StoreResult<Employee> {
        self.merge(id, fields)
    }

    async fn remove(&mut self, id: &EmployeeId) -> StoreResult<()> {
        self.delete(id)
    }
}
