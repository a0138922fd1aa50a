use crate::domain::vocabulary::Vocabulary;
use crate::utils::error::Result;
use std::path::Path;

/// Synchronous file access used by ingestion and export.
pub trait Storage {
    /// Names (not paths) of the regular files directly inside `dir`.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn prices_dir(&self) -> &str;
    fn file_marker(&self) -> &str;
    fn file_extension(&self) -> &str;
    fn sample_bytes(&self) -> usize;
    fn output_path(&self) -> &str;
    fn export_title(&self) -> &str;
    fn vocabulary(&self) -> &Vocabulary;
}
