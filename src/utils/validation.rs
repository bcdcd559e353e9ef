use crate::utils::error::{ConvertError, Result};
use std::ffi::OsStr;
use std::path::Path;

pub const MARKDOWN_EXTENSION: &str = "md";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ConvertError::InvalidPath {
            path: String::new(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    let lossy = path.to_string_lossy();
    if lossy.contains('\0') {
        return Err(ConvertError::InvalidPath {
            path: lossy.into_owned(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// The extension check is case-sensitive: `notes.MD` is rejected.
pub fn validate_markdown_extension(path: &Path) -> Result<()> {
    if path.extension().and_then(OsStr::to_str) == Some(MARKDOWN_EXTENSION) {
        Ok(())
    } else {
        Err(ConvertError::InvalidExtension {
            path: path.to_path_buf(),
        })
    }
}
