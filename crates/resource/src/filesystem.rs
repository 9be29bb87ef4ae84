use jarlabel_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads artwork from the local filesystem.
///
/// Catalog entries usually store paths relative to a shared artwork
/// directory, so relative paths are joined onto `base_path`. Absolute paths
/// are used as they are.
#[derive(Debug, Clone)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &Path) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve(path);
        log::debug!("Reading artwork from {}", full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_path_buf())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn base_path(&self) -> Option<&Path> {
        Some(&self.base_path)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("logos")).unwrap();
        fs::write(dir.path().join("logos/petrol.png"), b"logo").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(provider.exists(Path::new("logos/petrol.png")));
        let data = provider.load(Path::new("logos/petrol.png")).unwrap();
        assert_eq!(&*data, b"logo");
    }

    #[test]
    fn test_absolute_paths_bypass_base() {
        let artwork = tempdir().unwrap();
        let other = tempdir().unwrap();
        let absolute = artwork.path().join("bg.jpg");
        fs::write(&absolute, b"jpeg").unwrap();

        let provider = FilesystemResourceProvider::new(other.path());
        assert!(provider.exists(&absolute));
        assert_eq!(&*provider.load(&absolute).unwrap(), b"jpeg");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        let result = provider.load(Path::new("missing.png"));
        assert!(matches!(result, Err(ResourceError::NotFound(p)) if p == Path::new("missing.png")));
        assert!(!provider.exists(Path::new("missing.png")));
    }

    #[test]
    fn test_directory_does_not_exist_as_resource() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("logos")).unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(!provider.exists(Path::new("logos")));
        assert_eq!(provider.base_path(), Some(dir.path()));
    }
}
