//! Queued access to one store from several tasks.
//!
//! Mutations issued through clones of a `SharedStore` run strictly one
//! after another in request order (the tokio mutex is FIFO), each with its
//! own resynchronization. Two overlapping submissions therefore never race
//! on the snapshot.

use crate::aggregate::{summarize, DashboardStats};
use crate::model::employee::{Employee, EmployeeFields, EmployeeId};
use crate::repo::employee_store::{EmployeeStore, Snapshot, StoreResult};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SharedStore<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EmployeeStore> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn list(&self) -> StoreResult<Vec<Employee>> {
        self.inner.lock().await.list().await
    }

    pub async fn create(&self, fields: EmployeeFields) -> StoreResult<Employee> {
        self.inner.lock().await.create(fields).await
    }

    pub async fn update(&self, id: &EmployeeId, fields: EmployeeFields) -> StoreResult<Employee> {
        self.inner.lock().await.update(id, fields).await
    }

    pub async fn remove(&self, id: &EmployeeId) -> StoreResult<()> {
        self.inner.lock().await.remove(id).await
    }

    /// Waits for queued mutations ahead of this call, then copies the
    /// confirmed collection.
    pub async fn snapshot(&self) -> Snapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn stats(&self) -> DashboardStats {
        summarize(&self.snapshot().await)
    }
}
