//! Core logic for the staffdesk employee console.
//! This crate is the single source of truth for record reconciliation and
//! dashboard aggregation; UI layers only render what it returns.

pub mod aggregate;
pub mod auth;
pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use aggregate::{
    count_by_department, count_by_position, summarize, total_count, DashboardStats,
    UNASSIGNED_LABEL,
};
pub use auth::{register, RegistrationError, RegistrationForm};
pub use config::{ConfigError, ConsoleConfig, RemoteConfig, StorageMode};
pub use export::{csv_file_name, ExportTable, PDF_FILE_NAME, PDF_TITLE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::catalog::{CatalogEntry, CatalogKind, Catalogs};
pub use model::employee::{Assignment, Employee, EmployeeFields, EmployeeId, EmploymentStatus};
pub use model::image::{ImageFile, ImageHandle};
pub use model::validation::{Field, ValidationError, ValidationProfile};
pub use notify::{HttpNotifier, NotificationStatus, Notifier, WelcomeEmail, WELCOME_SUBJECT};
pub use repo::content_api::{load_catalogs, ContentApi, RemoteError};
pub use repo::employee_store::{EmployeeStore, Snapshot, StoreError, StoreResult};
pub use repo::http_api::HttpContentApi;
pub use repo::local_store::LocalEmployeeStore;
pub use repo::remote_store::RemoteEmployeeStore;
pub use repo::shared_store::SharedStore;
pub use service::employee_service::{ConfirmPrompt, EmployeeService, RemoveOutcome, DELETE_PROMPT};
pub use service::form_controller::{DraftField, EmployeeDraft, FormController, SubmitOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
