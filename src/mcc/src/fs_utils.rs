//! File system utilities for common traversal patterns

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Collect files under `path` whose extension matches, in sorted walk order
///
/// Extensions should not include the dot (e.g., "png" not ".png").
/// A missing directory yields an empty list.
pub fn collect_files_with_extension(path: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_extension(p, extensions))
        .collect()
}

/// Check a path's extension against a list (case-insensitive)
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Relative path of `path` under `base`, joined with forward slashes
pub fn relative_slash_path(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Write a file, creating parent directories as needed
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    fs::write(path, contents).map_err(Error::io(path))
}

/// Copy a file, creating parent directories as needed
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    fs::copy(from, to).map_err(Error::io(from))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b/sword.PNG"), &["png"]));
        assert!(has_extension(Path::new("pack.yaml"), &["yml", "yaml"]));
        assert!(!has_extension(Path::new("model.json.bak"), &["json"]));
        assert!(!has_extension(Path::new("README"), &["md"]));
    }

    #[test]
    fn test_relative_slash_path() {
        let base = Path::new("/tmp/pack/textures");
        let path = base.join("weapons").join("sword.png");
        assert_eq!(
            relative_slash_path(&path, base).as_deref(),
            Some("weapons/sword.png")
        );
        assert_eq!(relative_slash_path(Path::new("/elsewhere"), base), None);
    }

    #[test]
    fn test_collect_files_sorted() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_file(&temp_dir.path().join("b.png"), b"b").unwrap();
        write_file(&temp_dir.path().join("sub/a.png"), b"a").unwrap();
        write_file(&temp_dir.path().join("notes.txt"), b"n").unwrap();

        let files = collect_files_with_extension(temp_dir.path(), &["png"]);
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| relative_slash_path(p, temp_dir.path()))
            .collect();
        assert_eq!(names, vec!["b.png", "sub/a.png"]);
    }

    #[test]
    fn test_collect_missing_directory() {
        let files = collect_files_with_extension(Path::new("/nonexistent/mcc"), &["png"]);
        assert!(files.is_empty());
    }
}
