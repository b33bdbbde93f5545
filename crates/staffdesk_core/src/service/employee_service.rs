//! Employee use-case service.
//!
//! # Responsibility
//! - Provide the console's CRUD entry points over any `EmployeeStore`.
//! - Derive dashboard statistics and export tables from confirmed state.
//! - Check delete confirmation before removing anything.

use crate::aggregate::{summarize, DashboardStats};
use crate::export::ExportTable;
use crate::model::employee::{Employee, EmployeeFields, EmployeeId};
use crate::notify::{notify_welcome, NotificationStatus, Notifier};
use crate::repo::employee_store::{EmployeeStore, Snapshot, StoreResult};
use log::info;
use std::sync::Arc;

/// Prompt shown before a record is removed.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this employee?";

/// Blocking yes/no confirmation supplied by the caller.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// The user declined; nothing was sent or changed.
    Declined,
}

/// Use-case service wrapper for employee operations.
pub struct EmployeeService<S: EmployeeStore> {
    store: S,
    notifier: Option<Arc<dyn Notifier>>,
}

impl<S: EmployeeStore> EmployeeService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    /// Sends a welcome email after each create.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub async fn list(&mut self) -> StoreResult<Vec<Employee>> {
        self.store.list().await
    }

    pub async fn create(&mut self, fields: EmployeeFields) -> StoreResult<Employee> {
        self.store.create(fields).await
    }

    pub async fn update(&mut self, id: &EmployeeId, fields: EmployeeFields) -> StoreResult<Employee> {
        self.store.update(id, fields).await
    }

    /// Removes `id` only when `prompt` confirms.
    pub async fn remove_confirmed(
        &mut self,
        id: &EmployeeId,
        prompt: &dyn ConfirmPrompt,
    ) -> StoreResult<RemoveOutcome> {
        if !prompt.confirm(DELETE_PROMPT) {
            info!(
                "event=employee_remove module=service status=declined mode={} id={}",
                self.store.mode(),
                id
            );
            return Ok(RemoveOutcome::Declined);
        }
        self.store.remove(id).await?;
        Ok(RemoveOutcome::Removed)
    }

    pub async fn notify_welcome(&self, employee: &Employee) -> NotificationStatus {
        notify_welcome(self.notifier.as_deref(), employee).await
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Dashboard statistics over the confirmed snapshot.
    pub fn stats(&self) -> DashboardStats {
        summarize(&self.store.snapshot())
    }

    /// Export table over the confirmed snapshot, in profile column order.
    pub fn export_table(&self) -> ExportTable {
        ExportTable::from_records(&self.store.snapshot(), self.store.profile())
    }
}
