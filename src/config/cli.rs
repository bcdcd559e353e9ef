use crate::core::Storage;
use crate::utils::error::{ConvertError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// rw-r--r--, the usual permissions for files served as HTML.
pub const OUTPUT_FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    mode: u32,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::with_mode(OUTPUT_FILE_MODE)
    }

    /// Unix permission bits applied to written files; ignored elsewhere.
    pub fn with_mode(mode: u32) -> Self {
        Self { mode }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|source| ConvertError::ReadError {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let write_error = |source| ConvertError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.mode);
        }

        let mut file = options.open(path).map_err(write_error)?;
        file.write_all(data).map_err(write_error)?;

        // open() only applies the mode on creation and under the umask
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(self.mode))
                .map_err(write_error)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/page.html");
        let storage = LocalStorage::new();

        storage.write_file(&path, b"<p>hi</p>\n").unwrap();
        assert_eq!(storage.read_file(&path).unwrap(), b"<p>hi</p>\n");

        // overwriting truncates
        storage.write_file(&path, b"x").unwrap();
        assert_eq!(storage.read_file(&path).unwrap(), b"x");
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("page.html");
        LocalStorage::new().write_file(&path, b"ok").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, OUTPUT_FILE_MODE);
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.md");

        match LocalStorage::new().read_file(&path) {
            Err(ConvertError::ReadError { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected ReadError, got {:?}", other),
        }
    }
}
