//! Loading of label artwork (logos and backgrounds) by path.
//!
//! Tiers and brands refer to artwork by path. The renderer only needs the
//! bytes, so where they come from sits behind [`ResourceProvider`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Resource not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load resource '{}': {message}", path.display())]
    LoadFailed { path: PathBuf, message: String },
}

/// Artwork bytes shared between the cache and the document being built.
pub type SharedResourceData = Arc<Vec<u8>>;

pub trait ResourceProvider: Send + Sync + Debug {
    /// Loads the bytes stored under `path`.
    fn load(&self, path: &Path) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, path: &Path) -> bool;

    /// Directory relative paths are resolved against, if any.
    fn base_path(&self) -> Option<&Path> {
        None
    }

    /// Provider name for log lines.
    fn name(&self) -> &'static str;
}

/// Holds artwork in memory. Used by tests and by callers that already
/// have the bytes at hand.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<PathBuf, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `path`, replacing anything already there.
    pub fn add(&self, path: impl Into<PathBuf>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path = path.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: path.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(path, Arc::new(data));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &Path) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_path_buf(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_path_buf()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
