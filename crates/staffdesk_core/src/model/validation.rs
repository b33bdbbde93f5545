//! Required-field validation shared by stores, forms and registration.
//!
//! # Invariants
//! - A value is empty when it is absent or whitespace only.
//! - Every write path (store create/update, form submit) runs the same
//!   `ValidationProfile::validate`.

use crate::model::employee::EmployeeFields;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid email regex"));

/// Input field names used in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    FirstName,
    LastName,
    Email,
    Department,
    Position,
    HireDate,
    Status,
    Username,
    Password,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Department => "department",
            Self::Position => "position",
            Self::HireDate => "hire_date",
            Self::Status => "status",
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure. The draft or candidate is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(Field),
    InvalidEmail(String),
    InvalidDate(String),
    InvalidStatus(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidDate(value) => {
                write!(f, "invalid hire date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidStatus(value) => write!(
                f,
                "invalid status `{value}`; expected Active|Inactive|On Leave"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Which set of fields a deployment treats as required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationProfile {
    /// Name, email, department, position.
    #[default]
    Basic,
    /// First/last name, email, department, position, hire date, status.
    Extended,
}

const BASIC_FIELDS: [Field; 4] = [Field::Name, Field::Email, Field::Department, Field::Position];

const EXTENDED_FIELDS: [Field; 7] = [
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Position,
    Field::Department,
    Field::HireDate,
    Field::Status,
];

impl ValidationProfile {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "extended" => Some(Self::Extended),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
        }
    }

    pub fn required_fields(self) -> &'static [Field] {
        match self {
            Self::Basic => &BASIC_FIELDS,
            Self::Extended => &EXTENDED_FIELDS,
        }
    }

    /// Checks required fields in declaration order, then the email shape.
    ///
    /// # Errors
    /// - `MissingField` for the first absent or blank required field.
    /// - `InvalidEmail` when the email is present but not `local@domain`.
    pub fn validate(self, fields: &EmployeeFields) -> Result<(), ValidationError> {
        for field in self.required_fields() {
            if !is_supplied(fields, *field) {
                return Err(ValidationError::MissingField(*field));
            }
        }
        if let Some(email) = fields.email.as_deref() {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Display name for a validated field set.
    pub fn display_name(self, fields: &EmployeeFields) -> String {
        match self {
            Self::Basic => fields.name.as_deref().unwrap_or_default().trim().to_string(),
            Self::Extended => {
                let first = fields.first_name.as_deref().unwrap_or_default().trim();
                let last = fields.last_name.as_deref().unwrap_or_default().trim();
                format!("{first} {last}").trim().to_string()
            }
        }
    }
}

/// Returns the trimmed value, or `MissingField` when it is empty.
pub fn require_text(field: Field, value: Option<&str>) -> Result<&str, ValidationError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::MissingField(field)),
    }
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

fn is_supplied(fields: &EmployeeFields, field: Field) -> bool {
    let text = match field {
        Field::Name => fields.name.as_deref(),
        Field::FirstName => fields.first_name.as_deref(),
        Field::LastName => fields.last_name.as_deref(),
        Field::Email => fields.email.as_deref(),
        Field::Department => fields.department.as_deref(),
        Field::Position => fields.position.as_deref(),
        Field::HireDate => return fields.hire_date.is_some(),
        Field::Status => return fields.status.is_some(),
        Field::Username | Field::Password => return false,
    };
    require_text(field, text).is_ok()
}
