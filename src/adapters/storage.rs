use crate::domain::ports::Storage;
use crate::utils::error::{PriceError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let full_path = self.resolve(dir);
        let access_error = |source| PriceError::DirectoryAccessError {
            path: full_path.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&full_path).map_err(access_error)? {
            let entry = entry.map_err(access_error)?;
            if !entry.file_type().map_err(access_error)?.is_file() {
                continue;
            }
            // non UTF-8 names can never carry the marker token we look for
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        fs::write(&full_path, data).map_err(|source| PriceError::ExportError {
            path: full_path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_files_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("price_1.csv"), "a,b").unwrap();
        fs::create_dir(dir.path().join("price_dir.csv")).unwrap();

        let storage = LocalStorage::new(dir.path());
        let names = storage.list_files(Path::new(".")).unwrap();
        assert_eq!(names, vec!["price_1.csv".to_string()]);
    }

    #[test]
    fn test_list_missing_directory_is_access_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let err = storage.list_files(Path::new("missing")).unwrap_err();
        assert!(matches!(err, PriceError::DirectoryAccessError { .. }));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let err = storage
            .write_file(Path::new("no/such/dir/output.html"), b"<html>")
            .unwrap_err();
        assert!(matches!(err, PriceError::ExportError { .. }));
    }
}
