//! Dashboard aggregates derived from a collection snapshot.
//!
//! # Invariants
//! - Every function is pure over its input; nothing is cached.
//! - Labels are trimmed, and records without a department/position label
//!   are counted under `UNASSIGNED_LABEL`, so bucket sums equal the total.
//! - Results do not depend on input order.

use crate::model::employee::{Assignment, Employee};
use serde::Serialize;
use std::collections::BTreeMap;

/// Bucket for records with a missing or blank department/position.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Statistics shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub by_department: BTreeMap<String, usize>,
    pub by_position: BTreeMap<String, usize>,
}

pub fn total_count(records: &[Employee]) -> usize {
    records.len()
}

pub fn count_by_department(records: &[Employee]) -> BTreeMap<String, usize> {
    count_by(records, |employee| employee.department.as_ref())
}

pub fn count_by_position(records: &[Employee]) -> BTreeMap<String, usize> {
    count_by(records, |employee| employee.position.as_ref())
}

pub fn summarize(records: &[Employee]) -> DashboardStats {
    DashboardStats {
        total: total_count(records),
        by_department: count_by_department(records),
        by_position: count_by_position(records),
    }
}

fn count_by<F>(records: &[Employee], key: F) -> BTreeMap<String, usize>
where
    F: Fn(&Employee) -> Option<&Assignment>,
{
    let mut counts = BTreeMap::new();
    for employee in records {
        *counts.entry(bucket_label(key(employee))).or_insert(0) += 1;
    }
    counts
}

fn bucket_label(assignment: Option<&Assignment>) -> String {
    match assignment.map(|value| value.label.trim()) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => UNASSIGNED_LABEL.to_string(),
    }
}
