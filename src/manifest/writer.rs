//! Atomic manifest write
//!
//! 1. Write the full JSON to a sibling temp file
//! 2. fsync the temp file
//! 3. Rename over the target
//!
//! A failure at any step removes the temp file and leaves whatever was at
//! the target untouched.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{ExtractError, ExtractResult};

/// Temp file next to `target`: `.manifest.json.tmp` for `manifest.json`
fn temp_path_for(target: &Path) -> ExtractResult<PathBuf> {
    let file_name = target
        .file_name()
        .ok_or_else(|| ExtractError::invalid_output_path(target))?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    Ok(target.with_file_name(temp_name))
}

/// Write `contents` to `target`, replacing any existing file atomically
pub fn write_atomic(target: &Path, contents: &str) -> ExtractResult<()> {
    let temp_path = temp_path_for(target)?;

    if let Err(e) = write_and_sync(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, target) {
        let _ = fs::remove_file(&temp_path);
        return Err(ExtractError::io_error_at_path("replace", target, e));
    }

    // fsync the directory so the rename itself is durable
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

fn write_and_sync(path: &Path, contents: &str) -> ExtractResult<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| ExtractError::io_error_at_path("create", path, e))?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ExtractError::io_error_at_path("write", path, e))?;

    file.sync_all()
        .map_err(|e| ExtractError::io_error_at_path("fsync", path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("manifest.json");

        write_atomic(&target, "{}").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
        assert!(!dir.path().join(".manifest.json.tmp").exists());
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("manifest.json");
        fs::write(&target, "old contents that are longer").unwrap();

        write_atomic(&target, "new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_missing_parent_fails_without_creating_anything() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing").join("manifest.json");

        let err = write_atomic(&target, "{}").unwrap_err();

        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert!(!target.exists());
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_directory_target_fails_and_cleans_temp() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out");
        fs::create_dir(&target).unwrap();

        assert!(write_atomic(&target, "{}").is_err());

        assert!(target.is_dir());
        assert!(!dir.path().join(".out.tmp").exists());
    }

    #[test]
    fn test_path_without_file_name_is_rejected() {
        let err = write_atomic(Path::new("/"), "{}").unwrap_err();
        assert!(err.to_string().contains("does not name a file"));
    }
}
