//! Profile image upload and object reference types.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// URL scheme prefix for locally issued object references.
pub const OBJECT_URL_PREFIX: &str = "blob:staffdesk/";

/// Picture selected in a form. Never persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Object reference issued for an uploaded picture.
///
/// Valid only while the owning record keeps it; the store revokes it when
/// the picture is replaced or the record is removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub(crate) fn issue() -> Self {
        Self(format!("{OBJECT_URL_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

impl Display for ImageHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
