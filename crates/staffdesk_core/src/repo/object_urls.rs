//! Object references issued for uploaded profile images.
//!
//! # Invariants
//! - Each live handle maps to exactly one uploaded file.
//! - A revoked handle never resolves again.

use crate::model::image::{ImageFile, ImageHandle};
use log::debug;
use std::collections::HashMap;

/// Table of live object references owned by a local store.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    live: HashMap<ImageHandle, ImageFile>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new handle for `file`.
    pub fn create(&mut self, file: ImageFile) -> ImageHandle {
        let handle = ImageHandle::issue();
        debug!(
            "event=object_url_create module=repo status=ok bytes={}",
            file.bytes.len()
        );
        self.live.insert(handle.clone(), file);
        handle
    }

    /// Releases `handle`. Returns whether it was live.
    pub fn revoke(&mut self, handle: &ImageHandle) -> bool {
        let released = self.live.remove(handle).is_some();
        debug!("event=object_url_revoke module=repo status=ok released={released}");
        released
    }

    pub fn resolve(&self, handle: &ImageHandle) -> Option<&ImageFile> {
        self.live.get(handle)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
