//! Path helpers for locating the markdown source and its HTML output.

use crate::utils::error::Result;
use crate::utils::validation::validate_markdown_extension;
use std::env;
use std::path::{Component, Path, PathBuf};

pub const HTML_EXTENSION: &str = "html";

/// Expands a leading `~` component to the current user's home directory.
///
/// Only a bare `~` component is expanded; `~user/...` and paths with no
/// leading tilde are returned unchanged, as is everything when the home
/// directory cannot be determined.
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            if stripped.as_os_str().is_empty() {
                return home;
            }
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Lexically cleans a path without touching the filesystem.
///
/// Repeated separators and `.` components are dropped, `..` cancels the
/// preceding normal component, `..` directly under the root is dropped,
/// and leading `..` components of a relative path are kept. An empty
/// result becomes `.`.
pub fn clean<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Validates the `.md` extension, expands `~` and cleans the path.
pub fn normalize_input<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    validate_markdown_extension(path)?;
    Ok(clean(expand_tilde(path)))
}

/// Sibling of `input` with the `.md` suffix replaced by `.html`.
pub fn derive_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension(HTML_EXTENSION)
}

/// Picks the explicit output path if one was given, otherwise derives it
/// from `input`, and returns it as a clean absolute path.
pub fn resolve_output_path(explicit: Option<&Path>, input: &Path) -> Result<PathBuf> {
    let output = match explicit {
        Some(path) => expand_tilde(path),
        None => derive_output_path(input),
    };
    absolutize(output)
}

pub fn absolutize<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(clean(path));
    }
    let cwd = env::current_dir()?;
    Ok(clean(cwd.join(path)))
}
