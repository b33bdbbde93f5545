//! Department and position reference catalogs.

use serde::{Deserialize, Serialize};

/// Page size used when loading a catalog.
pub const CATALOG_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Department,
    Position,
}

impl CatalogKind {
    /// Collection path segment on the content API.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Department => "departments",
            Self::Position => "positions",
        }
    }
}

/// One selectable department or position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

/// Both catalogs as offered by the remote form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogs {
    pub departments: Vec<CatalogEntry>,
    pub positions: Vec<CatalogEntry>,
}

impl Catalogs {
    pub fn entries(&self, kind: CatalogKind) -> &[CatalogEntry] {
        match kind {
            CatalogKind::Department => &self.departments,
            CatalogKind::Position => &self.positions,
        }
    }

    /// Display name for a catalog id.
    pub fn name_of(&self, kind: CatalogKind, id: &str) -> Option<&str> {
        self.entries(kind)
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.name.as_str())
    }
}
