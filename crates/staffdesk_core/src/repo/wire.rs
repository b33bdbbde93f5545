//! Content API envelope shapes.
//!
//! Requests and responses wrap records as `{"data": …}`; single records are
//! `{"id": …, "attributes": {…}}` and expanded relations nest the same
//! shape under their own `data` key.

use crate::model::catalog::CatalogEntry;
use crate::model::employee::{Assignment, Employee, EmployeeFields, EmployeeId, EmploymentStatus};
use crate::model::validation::ValidationProfile;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Collection response: a page of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PagedEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

/// A missing `meta` block means the response held the whole collection.
impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 0,
            page_count: 1,
            total: 0,
        }
    }
}

/// One fetched page of employees.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeePage {
    pub records: Vec<EmployeeResource>,
    /// Number of pages the server reports for the whole collection.
    pub page_count: u32,
}

impl From<PagedEnvelope<EmployeeResource>> for EmployeePage {
    fn from(value: PagedEnvelope<EmployeeResource>) -> Self {
        Self {
            records: value.data,
            page_count: value.meta.pagination.page_count,
        }
    }
}

/// Resource id. The API emits numbers; text ids are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(pub String);

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Self(value.to_string()),
            Raw::Text(value) => Self(value),
        })
    }
}

/// Serializes numeric ids as JSON numbers.
impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(value) => serializer.serialize_u64(value),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<A> {
    pub id: ResourceId,
    pub attributes: A,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogAttributes {
    pub name: String,
}

pub type CatalogResource = Resource<CatalogAttributes>;

impl From<CatalogResource> for CatalogEntry {
    fn from(value: CatalogResource) -> Self {
        Self {
            id: value.id.0,
            name: value.attributes.name,
        }
    }
}

/// Expanded relation. `data` is null for an unset relation and the whole
/// key is missing when the relation was not populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(default)]
    pub data: Option<CatalogResource>,
}

impl Relation {
    fn into_assignment(self) -> Option<Assignment> {
        self.data
            .map(|resource| Assignment::reference(resource.id.0, resource.attributes.name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Relation,
    #[serde(default)]
    pub position: Relation,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<EmploymentStatus>,
}

pub type EmployeeResource = Resource<EmployeeAttributes>;

impl From<EmployeeResource> for Employee {
    fn from(value: EmployeeResource) -> Self {
        let attributes = value.attributes;
        let name = attributes.name.unwrap_or_else(|| {
            let first = attributes.first_name.as_deref().unwrap_or_default();
            let last = attributes.last_name.as_deref().unwrap_or_default();
            format!("{first} {last}").trim().to_string()
        });

        Self {
            id: EmployeeId::new(value.id.0),
            name,
            first_name: attributes.first_name,
            last_name: attributes.last_name,
            email: attributes.email.unwrap_or_default(),
            department: attributes.department.into_assignment(),
            position: attributes.position.into_assignment(),
            hire_date: attributes.hire_date,
            status: attributes.status,
            profile_image: None,
        }
    }
}

/// Outgoing attributes for create and update.
///
/// Relations are sent as catalog ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    pub department: ResourceId,
    pub position: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmploymentStatus>,
}

impl EmployeePayload {
    /// Builds the payload from a validated field set.
    pub fn from_fields(fields: &EmployeeFields, profile: ValidationProfile) -> Self {
        let text = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();
        Self {
            name: profile.display_name(fields),
            first_name: fields.first_name.as_ref().map(|value| value.trim().to_string()),
            last_name: fields.last_name.as_ref().map(|value| value.trim().to_string()),
            email: text(&fields.email),
            department: ResourceId(text(&fields.department)),
            position: ResourceId(text(&fields.position)),
            hire_date: fields.hire_date,
            status: fields.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EmployeePage, EmployeePayload, EmployeeResource, Envelope, PagedEnvelope};
    use crate::model::employee::{Assignment, Employee, EmployeeFields};
    use crate::model::validation::ValidationProfile;
    use serde_json::json;

    #[test]
    fn expanded_resource_unwraps_relations() {
        let body = json!({
            "data": [{
                "id": 4,
                "attributes": {
                    "name": "Ann",
                    "email": "a@x.com",
                    "createdAt": "2024-01-01T00:00:00.000Z",
                    "department": {"data": {"id": 2, "attributes": {"name": "Engineering"}}},
                    "position": {"data": null}
                }
            }],
            "meta": {"pagination": {"page": 1}}
        });

        let page = EmployeePage::from(
            serde_json::from_value::<PagedEnvelope<EmployeeResource>>(body).unwrap(),
        );
        assert_eq!(page.page_count, 1);
        let employee = Employee::from(page.records.into_iter().next().unwrap());

        assert_eq!(employee.id.as_str(), "4");
        assert_eq!(employee.name, "Ann");
        assert_eq!(
            employee.department,
            Some(Assignment::reference("2", "Engineering"))
        );
        assert_eq!(employee.position, None);
    }

    #[test]
    fn payload_sends_numeric_relation_ids_as_numbers() {
        let fields = EmployeeFields::basic("Ann", "a@x.com", "2", "5");
        let payload = EmployeePayload::from_fields(&fields, ValidationProfile::Basic);

        let value = serde_json::to_value(Envelope { data: payload }).unwrap();
        assert_eq!(
            value,
            json!({"data": {"name": "Ann", "email": "a@x.com", "department": 2, "position": 5}})
        );
    }

    #[test]
    fn pagination_meta_reports_page_count() {
        let body = json!({
            "data": [],
            "meta": {"pagination": {"page": 2, "pageSize": 25, "pageCount": 4, "total": 90}}
        });

        let page = EmployeePage::from(
            serde_json::from_value::<PagedEnvelope<EmployeeResource>>(body).unwrap(),
        );
        assert!(page.records.is_empty());
        assert_eq!(page.page_count, 4);

        let bare: PagedEnvelope<EmployeeResource> =
            serde_json::from_value(json!({"data": []})).unwrap();
        assert_eq!(bare.meta.pagination.page_count, 1);
    }
}
