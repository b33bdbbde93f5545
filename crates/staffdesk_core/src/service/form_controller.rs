//! Form staging between raw user input and the employee service.
//!
//! # Responsibility
//! - Hold the draft being typed and the optional edit target.
//! - Convert the draft into validated fields and submit it as create or
//!   update.
//!
//! # Invariants
//! - At most one record is targeted for edit.
//! - A failed submit leaves the draft and edit target untouched.
//! - `cancel` never touches the store.

use crate::model::employee::{Assignment, Employee, EmployeeFields, EmployeeId, EmploymentStatus};
use crate::model::image::ImageFile;
use crate::model::validation::{ValidationError, ValidationProfile};
use crate::notify::NotificationStatus;
use crate::repo::employee_store::{EmployeeStore, StoreResult};
use crate::service::employee_service::{ConfirmPrompt, EmployeeService, RemoveOutcome};
use chrono::NaiveDate;
use log::debug;

const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Editable text inputs of the employee form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    FirstName,
    LastName,
    Email,
    Department,
    Position,
    HireDate,
    Status,
}

impl DraftField {
    /// Maps an input `name` attribute (`firstName`, `hireDate`, …).
    pub fn from_input_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "firstName" => Some(Self::FirstName),
            "lastName" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "department" => Some(Self::Department),
            "position" => Some(Self::Position),
            "hireDate" => Some(Self::HireDate),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// Raw form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub hire_date: String,
    pub status: String,
    /// Newly selected picture. Not part of the persisted record.
    pub profile_image: Option<ImageFile>,
}

impl EmployeeDraft {
    /// Empty draft; the extended form preselects `Active`.
    pub fn for_profile(profile: ValidationProfile) -> Self {
        match profile {
            ValidationProfile::Basic => Self::default(),
            ValidationProfile::Extended => Self {
                status: EmploymentStatus::Active.as_str().to_string(),
                ..Self::default()
            },
        }
    }

    pub fn from_employee(employee: &Employee) -> Self {
        let assignment_value = |value: Option<&Assignment>| {
            value
                .map(|assignment| assignment.form_value().to_string())
                .unwrap_or_default()
        };
        Self {
            name: employee.name.clone(),
            first_name: employee.first_name.clone().unwrap_or_default(),
            last_name: employee.last_name.clone().unwrap_or_default(),
            email: employee.email.clone(),
            department: assignment_value(employee.department.as_ref()),
            position: assignment_value(employee.position.as_ref()),
            hire_date: employee
                .hire_date
                .map(|date| date.format(HIRE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            status: employee
                .status
                .map(|status| status.as_str().to_string())
                .unwrap_or_default(),
            profile_image: None,
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Email => &self.email,
            DraftField::Department => &self.department,
            DraftField::Position => &self.position,
            DraftField::HireDate => &self.hire_date,
            DraftField::Status => &self.status,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Email => &mut self.email,
            DraftField::Department => &mut self.department,
            DraftField::Position => &mut self.position,
            DraftField::HireDate => &mut self.hire_date,
            DraftField::Status => &mut self.status,
        };
        *slot = value.into();
    }

    /// Parses the draft and checks it against `profile`.
    ///
    /// Blank inputs become "not supplied".
    ///
    /// # Errors
    /// - `InvalidDate` / `InvalidStatus` for unparseable non-blank input.
    /// - Any error from `ValidationProfile::validate`.
    pub fn to_fields(&self, profile: ValidationProfile) -> Result<EmployeeFields, ValidationError> {
        let hire_date = match non_blank(&self.hire_date) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, HIRE_DATE_FORMAT)
                    .map_err(|_| ValidationError::InvalidDate(raw.clone()))?,
            ),
            None => None,
        };
        let status = match non_blank(&self.status) {
            Some(raw) => Some(
                EmploymentStatus::parse(&raw).ok_or_else(|| ValidationError::InvalidStatus(raw.clone()))?,
            ),
            None => None,
        };

        let fields = EmployeeFields {
            name: non_blank(&self.name),
            first_name: non_blank(&self.first_name),
            last_name: non_blank(&self.last_name),
            email: non_blank(&self.email),
            department: non_blank(&self.department),
            position: non_blank(&self.position),
            hire_date,
            status,
            profile_image: self.profile_image.clone(),
        };
        profile.validate(&fields)?;
        Ok(fields)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created {
        employee: Employee,
        notification: NotificationStatus,
    },
    Updated(Employee),
}

/// Draft and edit-mode state for one employee form.
#[derive(Debug, Clone)]
pub struct FormController {
    profile: ValidationProfile,
    draft: EmployeeDraft,
    edit_target: Option<EmployeeId>,
    open: bool,
}

impl FormController {
    pub fn new(profile: ValidationProfile) -> Self {
        Self {
            profile,
            draft: EmployeeDraft::for_profile(profile),
            edit_target: None,
            open: false,
        }
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn edit_target(&self) -> Option<&EmployeeId> {
        self.edit_target.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Shows an empty "add" form.
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Sets a field by input name. Returns `false` for unknown names.
    pub fn set_input(&mut self, name: &str, value: impl Into<String>) -> bool {
        match DraftField::from_input_name(name) {
            Some(field) => {
                self.draft.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn attach_image(&mut self, file: ImageFile) {
        self.draft.profile_image = Some(file);
    }

    /// Loads `record` into the draft and targets it for update.
    ///
    /// Replaces any previous edit target.
    pub fn begin_edit(&mut self, record: &Employee) {
        self.draft = EmployeeDraft::from_employee(record);
        self.edit_target = Some(record.id.clone());
        self.open = true;
        debug!("event=form_edit module=service status=ok id={}", record.id);
    }

    /// Discards the draft and leaves edit mode.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Validates the draft and hands it to the service.
    ///
    /// # Errors
    /// - `Validation` before anything is sent; the draft is kept.
    /// - Store errors from create/update; the draft is kept.
    pub async fn submit<S: EmployeeStore>(
        &mut self,
        service: &mut EmployeeService<S>,
    ) -> StoreResult<SubmitOutcome> {
        let fields = self.draft.to_fields(self.profile)?;

        let outcome = match self.edit_target.clone() {
            Some(id) => SubmitOutcome::Updated(service.update(&id, fields).await?),
            None => {
                let employee = service.create(fields).await?;
                let notification = service.notify_welcome(&employee).await;
                SubmitOutcome::Created {
                    employee,
                    notification,
                }
            }
        };

        self.reset();
        Ok(outcome)
    }

    /// Confirms and removes `id`. Removing the edit target leaves edit mode.
    pub async fn delete<S: EmployeeStore>(
        &mut self,
        service: &mut EmployeeService<S>,
        id: &EmployeeId,
        prompt: &dyn ConfirmPrompt,
    ) -> StoreResult<RemoveOutcome> {
        let outcome = service.remove_confirmed(id, prompt).await?;
        if outcome == RemoveOutcome::Removed && self.edit_target.as_ref() == Some(id) {
            self.reset();
        }
        Ok(outcome)
    }

    fn reset(&mut self) {
        self.draft = EmployeeDraft::for_profile(self.profile);
        self.edit_target = None;
        self.open = false;
    }
}
