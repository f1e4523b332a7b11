//! Image storage collaborator.
//!
//! The application stores uploaded restaurant and menu-item images in some
//! blob store; the catalog only holds the returned reference path and asks
//! the store to delete the old asset when an image is replaced or its owner
//! is deleted.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, Result};

/// Reference path to a stored image asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePath(String);

impl ImagePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImagePath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Trait for image storage operations.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores an uploaded image and returns its reference path.
    async fn store(&self, data: Vec<u8>, extension: &str) -> Result<ImagePath>;

    /// Removes a previously stored image.
    ///
    /// Removing an unknown path is a no-op, so callers can clean up
    /// references without checking existence first.
    async fn remove(&self, path: &ImagePath) -> Result<()>;
}

#[derive(Debug, Default)]
struct InMemoryImageState {
    files: HashMap<String, Vec<u8>>,
    next_id: u32,
    fail_on_store: bool,
}

/// In-memory image store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStore {
    state: Arc<RwLock<InMemoryImageState>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail on the next store call.
    pub fn set_fail_on_store(&self, fail: bool) {
        self.state.write().unwrap().fail_on_store = fail;
    }

    /// Returns the number of stored images.
    pub fn image_count(&self) -> usize {
        self.state.read().unwrap().files.len()
    }

    /// Returns true if an image exists at the given path.
    pub fn has_image(&self, path: &ImagePath) -> bool {
        self.state.read().unwrap().files.contains_key(path.as_str())
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, data: Vec<u8>, extension: &str) -> Result<ImagePath> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_store {
            return Err(CatalogError::Storage("store unavailable".to_string()));
        }

        state.next_id += 1;
        let path = format!("/uploads/{:04}.{extension}", state.next_id);
        state.files.insert(path.clone(), data);

        Ok(ImagePath::new(path))
    }

    async fn remove(&self, path: &ImagePath) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.files.remove(path.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_and_remove() {
        let images = InMemoryImageStore::new();

        let path = images.store(vec![1, 2, 3], "png").await.unwrap();
        assert!(path.as_str().ends_with(".png"));
        assert_eq!(images.image_count(), 1);
        assert!(images.has_image(&path));

        images.remove(&path).await.unwrap();
        assert_eq!(images.image_count(), 0);
    }

    #[tokio::test]
    async fn remove_unknown_path_is_noop() {
        let images = InMemoryImageStore::new();
        images.remove(&ImagePath::from("/uploads/nope.jpg")).await.unwrap();
        assert_eq!(images.image_count(), 0);
    }

    #[tokio::test]
    async fn fail_on_store() {
        let images = InMemoryImageStore::new();
        images.set_fail_on_store(true);

        let result = images.store(vec![0], "jpg").await;
        assert!(matches!(result, Err(CatalogError::Storage(_))));
        assert_eq!(images.image_count(), 0);
    }
}
