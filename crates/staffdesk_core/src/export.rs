//! Tabular export of a collection snapshot.
//!
//! # Responsibility
//! - Put records into the documented column order for CSV and PDF output.
//! - Serialize CSV the way the dashboard download does.
//!
//! # Invariants
//! - Column order depends only on the validation profile.
//! - CSV cells never contain commas: embedded commas are stripped, not
//!   escaped.

use crate::model::employee::Employee;
use crate::model::validation::ValidationProfile;
use chrono::NaiveDate;

/// Title rendered above the PDF table.
pub const PDF_TITLE: &str = "Employee List";

/// File name used for the PDF download.
pub const PDF_FILE_NAME: &str = "employees.pdf";

const BASIC_HEADERS: &[&str] = &["Name", "Email", "Department", "Position"];

const EXTENDED_HEADERS: &[&str] = &[
    "First Name",
    "Last Name",
    "Email",
    "Position",
    "Department",
    "Hire Date",
    "Status",
];

/// Header row plus one row per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn from_records(records: &[Employee], profile: ValidationProfile) -> Self {
        let headers = match profile {
            ValidationProfile::Basic => BASIC_HEADERS,
            ValidationProfile::Extended => EXTENDED_HEADERS,
        };
        Self {
            headers: headers.iter().map(|header| header.to_string()).collect(),
            rows: records.iter().map(|record| row(record, profile)).collect(),
        }
    }

    /// Comma-joined lines separated by `\n`, header first.
    pub fn to_csv(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| cell.replace(',', ""))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Download name for a CSV export taken on `date`.
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("employees_{}.csv", date.format("%Y-%m-%d"))
}

fn row(record: &Employee, profile: ValidationProfile) -> Vec<String> {
    let department = record.department_label().unwrap_or_default().to_string();
    let position = record.position_label().unwrap_or_default().to_string();
    match profile {
        ValidationProfile::Basic => {
            vec![record.name.clone(), record.email.clone(), department, position]
        }
        ValidationProfile::Extended => vec![
            record.first_name.clone().unwrap_or_default(),
            record.last_name.clone().unwrap_or_default(),
            record.email.clone(),
            position,
            department,
            record
                .hire_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            record
                .status
                .map(|status| status.as_str().to_string())
                .unwrap_or_default(),
        ],
    }
}
