#![allow(dead_code)]

use async_trait::async_trait;
use staffdesk_core::repo::wire::{
    CatalogAttributes, CatalogResource, EmployeeAttributes, EmployeePage, EmployeePayload,
    EmployeeResource, Relation, Resource, ResourceId,
};
use staffdesk_core::{
    CatalogEntry, CatalogKind, ContentApi, EmployeeFields, EmployeeId, RemoteError,
};
use std::sync::Mutex;

/// Call the fake should fail once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Fetch,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
struct StoredEmployee {
    id: u64,
    payload: EmployeePayload,
}

#[derive(Debug, Default)]
struct ServerState {
    employees: Vec<StoredEmployee>,
    next_id: u64,
    fail_on: Option<FailOn>,
    duplicate_next_fetch: bool,
    fetches: usize,
    puts: Vec<EmployeePayload>,
}

/// In-process content API with failure injection.
#[derive(Debug)]
pub struct FakeContentApi {
    departments: Vec<CatalogEntry>,
    positions: Vec<CatalogEntry>,
    state: Mutex<ServerState>,
}

impl FakeContentApi {
    pub fn new() -> Self {
        Self {
            departments: entries(&[("1", "Engineering"), ("2", "Sales"), ("3", "Operations")]),
            positions: entries(&[("1", "Developer"), ("2", "Manager")]),
            state: Mutex::new(ServerState {
                next_id: 1,
                ..ServerState::default()
            }),
        }
    }

    pub fn fail_next(&self, call: FailOn) {
        self.state.lock().unwrap().fail_on = Some(call);
    }

    /// Makes the next page fetch repeat its first record.
    pub fn duplicate_next_fetch(&self) {
        self.state.lock().unwrap().duplicate_next_fetch = true;
    }

    /// Number of page requests served.
    pub fn fetches(&self) -> usize {
        self.state.lock().unwrap().fetches
    }

    pub fn server_count(&self) -> usize {
        self.state.lock().unwrap().employees.len()
    }

    pub fn last_put(&self) -> Option<EmployeePayload> {
        self.state.lock().unwrap().puts.last().cloned()
    }

    pub fn put_count(&self) -> usize {
        self.state.lock().unwrap().puts.len()
    }

    /// Deletes a record behind the client's back.
    pub fn delete_out_of_band(&self, id: &EmployeeId) {
        let id: u64 = id.as_str().parse().unwrap();
        self.state
            .lock()
            .unwrap()
            .employees
            .retain(|stored| stored.id != id);
    }

    fn take_failure(&self, call: FailOn) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_on == Some(call) {
            state.fail_on = None;
            return Err(RemoteError::status(500, "Internal Server Error"));
        }
        Ok(())
    }

    fn relation(entries: &[CatalogEntry], id: &ResourceId) -> Relation {
        Relation {
            data: entries
                .iter()
                .find(|entry| entry.id == id.0)
                .map(|entry| CatalogResource {
                    id: ResourceId(entry.id.clone()),
                    attributes: CatalogAttributes {
                        name: entry.name.clone(),
                    },
                }),
        }
    }
}

fn entries(pairs: &[(&str, &str)]) -> Vec<CatalogEntry> {
    pairs
        .iter()
        .map(|(id, name)| CatalogEntry {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

fn parse_id(id: &EmployeeId) -> Result<u64, RemoteError> {
    id.as_str()
        .parse()
        .map_err(|_| RemoteError::status(404, "Not Found"))
}

#[async_trait]
impl ContentApi for FakeContentApi {
    async fn fetch_employees(&self, page: u32, page_size: u32) -> Result<EmployeePage, RemoteError> {
        tokio::task::yield_now().await;
        self.take_failure(FailOn::Fetch)?;

        let mut state = self.state.lock().unwrap();
        state.fetches += 1;
        let page_size = page_size.max(1) as usize;
        let page_count = state.employees.len().div_ceil(page_size).max(1) as u32;
        let mut records: Vec<EmployeeResource> = state
            .employees
            .iter()
            .skip((page.saturating_sub(1) as usize) * page_size)
            .take(page_size)
            .map(|stored| Resource {
                id: ResourceId(stored.id.to_string()),
                attributes: EmployeeAttributes {
                    name: Some(stored.payload.name.clone()),
                    first_name: stored.payload.first_name.clone(),
                    last_name: stored.payload.last_name.clone(),
                    email: Some(stored.payload.email.clone()),
                    department: Self::relation(&self.departments, &stored.payload.department),
                    position: Self::relation(&self.positions, &stored.payload.position),
                    hire_date: stored.payload.hire_date,
                    status: stored.payload.status,
                },
            })
            .collect();
        if std::mem::take(&mut state.duplicate_next_fetch) {
            if let Some(first) = records.first().cloned() {
                records.push(first);
            }
        }
        Ok(EmployeePage {
            records,
            page_count,
        })
    }

    async fn create_employee(&self, payload: &EmployeePayload) -> Result<EmployeeId, RemoteError> {
        tokio::task::yield_now().await;
        self.take_failure(FailOn::Create)?;

        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.employees.push(StoredEmployee {
            id,
            payload: payload.clone(),
        });
        Ok(EmployeeId::from(id))
    }

    async fn update_employee(
        &self,
        id: &EmployeeId,
        payload: &EmployeePayload,
    ) -> Result<(), RemoteError> {
        tokio::task::yield_now().await;
        self.take_failure(FailOn::Update)?;

        let id = parse_id(id)?;
        let mut state = self.state.lock().unwrap();
        state.puts.push(payload.clone());
        let stored = state
            .employees
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or_else(|| RemoteError::status(404, "Not Found"))?;
        stored.payload = payload.clone();
        Ok(())
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), RemoteError> {
        tokio::task::yield_now().await;
        self.take_failure(FailOn::Delete)?;

        let id = parse_id(id)?;
        let mut state = self.state.lock().unwrap();
        let before = state.employees.len();
        state.employees.retain(|stored| stored.id != id);
        if state.employees.len() == before {
            return Err(RemoteError::status(404, "Not Found"));
        }
        Ok(())
    }

    async fn fetch_catalog(
        &self,
        kind: CatalogKind,
        page_size: u32,
    ) -> Result<Vec<CatalogEntry>, RemoteError> {
        let entries = match kind {
            CatalogKind::Department => &self.departments,
            CatalogKind::Position => &self.positions,
        };
        Ok(entries.iter().take(page_size as usize).cloned().collect())
    }
}

/// Basic-profile candidate referencing catalog ids.
pub fn remote_candidate(name: &str, department_id: &str, position_id: &str) -> EmployeeFields {
    EmployeeFields::basic(
        name,
        format!("{}@example.com", name.to_lowercase()),
        department_id,
        position_id,
    )
}
