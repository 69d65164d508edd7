use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary vault directory
pub fn create_test_vault_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content, including any parent folders
pub fn create_test_file(vault_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = vault_dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}
