use std::path::PathBuf;
use tempfile::TempDir;

/// Test storage configuration.
pub struct TestStorage {
    pub temp_dir: TempDir,
    pub base_path: PathBuf,
}

impl TestStorage {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let base_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            base_path,
        }
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}
