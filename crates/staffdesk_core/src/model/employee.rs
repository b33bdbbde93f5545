//! Employee record and partial field set.
//!
//! # Responsibility
//! - Define the `Employee` record returned by every store.
//! - Define `EmployeeFields`, the candidate shape used by create and by
//!   merge-on-edit.
//!
//! # Invariants
//! - `EmployeeId` is stable for a record lifetime and never reused.
//! - `EmployeeFields::overlay` is a shallow merge: supplied values win,
//!   omitted values are preserved.

use crate::model::image::{ImageFile, ImageHandle};
use crate::model::validation::ValidationProfile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Record identifier.
///
/// Remote records carry the server-assigned id as text; local records carry
/// a decimal numeric token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EmployeeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for EmployeeId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Employment status offered by the extended form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    #[default]
    Active,
    Inactive,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 3] = [Self::Active, Self::Inactive, Self::OnLeave];

    /// Display label, identical to the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
        }
    }

    /// Parses a label case-insensitively, ignoring surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(normalized))
    }
}

impl Display for EmploymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Department or position value held by a record.
///
/// Local records hold a free-text label. Remote records reference a catalog
/// entry and keep its display name as the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Option<String>,
    pub label: String,
}

impl Assignment {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
        }
    }

    pub fn reference(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            label: label.into(),
        }
    }

    /// Value a form edits: the catalog id when referenced, else the label.
    pub fn form_value(&self) -> &str {
        self.id.as_deref().unwrap_or(self.label.as_str())
    }
}

/// Canonical employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Display name. Derived from first and last name under the extended
    /// profile.
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub department: Option<Assignment>,
    pub position: Option<Assignment>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<EmploymentStatus>,
    /// Object reference to an uploaded picture. Local mode only.
    pub profile_image: Option<ImageHandle>,
}

impl Employee {
    /// Builds a record from validated fields.
    ///
    /// Text values are trimmed. Department and position become plain labels; remote stores build
    /// referenced assignments from the wire shape instead.
    pub fn from_fields(id: EmployeeId, fields: &EmployeeFields, profile: ValidationProfile) -> Self {
        Self {
            id,
            name: profile.display_name(fields),
            first_name: trimmed(&fields.first_name),
            last_name: trimmed(&fields.last_name),
            email: trimmed(&fields.email).unwrap_or_default(),
            department: trimmed(&fields.department).map(Assignment::label),
            position: trimmed(&fields.position).map(Assignment::label),
            hire_date: fields.hire_date,
            status: fields.status,
            profile_image: None,
        }
    }

    pub fn department_label(&self) -> Option<&str> {
        self.department.as_ref().map(|value| value.label.as_str())
    }

    pub fn position_label(&self) -> Option<&str> {
        self.position.as_ref().map(|value| value.label.as_str())
    }

    /// Projects this record back into a complete field set.
    ///
    /// The profile image is not carried: a stored handle is not an upload.
    pub fn to_fields(&self) -> EmployeeFields {
        EmployeeFields {
            name: Some(self.name.clone()),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: Some(self.email.clone()),
            department: self
                .department
                .as_ref()
                .map(|value| value.form_value().to_string()),
            position: self
                .position
                .as_ref()
                .map(|value| value.form_value().to_string()),
            hire_date: self.hire_date,
            status: self.status,
            profile_image: None,
        }
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|text| text.trim().to_string())
}

/// Candidate values for create, or the partial change set for update.
///
/// `None` means "not supplied". For update it keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Label in local mode, catalog id in remote mode.
    pub department: Option<String>,
    /// Label in local mode, catalog id in remote mode.
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<EmploymentStatus>,
    pub profile_image: Option<ImageFile>,
}

impl EmployeeFields {
    /// Complete candidate for the basic profile.
    pub fn basic(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            department: Some(department.into()),
            position: Some(position.into()),
            ..Self::default()
        }
    }

    /// Overlays these values onto `base`.
    pub fn overlay(self, base: EmployeeFields) -> EmployeeFields {
        EmployeeFields {
            name: self.name.or(base.name),
            first_name: self.first_name.or(base.first_name),
            last_name: self.last_name.or(base.last_name),
            email: self.email.or(base.email),
            department: self.department.or(base.department),
            position: self.position.or(base.position),
            hire_date: self.hire_date.or(base.hire_date),
            status: self.status.or(base.status),
            profile_image: self.profile_image.or(base.profile_image),
        }
    }
}
