//! On-disk state documents for talon
//!
//! Everything talon persists lives as whole JSON documents under the
//! user config directory (~/.config/talon/ on Linux). Callers read and
//! write a named document at a time; the directory is created lazily on
//! the first write.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

const APP_DIR: &str = "talon";

/// Path of a named document under the talon config directory
pub fn document_path(name: &str) -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(base.join(APP_DIR).join(name))
}

/// Whether a named document exists on disk
pub fn document_exists(name: &str) -> bool {
    document_path(name).map(|p| p.exists()).unwrap_or(false)
}

/// Read and parse a named JSON document
pub fn read_document<T: DeserializeOwned>(name: &str) -> Result<T> {
    read_json(&document_path(name)?)
}

/// Write a named JSON document, creating the directory when missing
pub fn write_document<T: Serialize>(name: &str, value: &T) -> Result<()> {
    let path = document_path(name)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    }
    write_json(&path, value)
}

/// Parse a JSON document at an arbitrary path
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write a value as pretty-printed JSON to an arbitrary path
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path_lands_in_app_dir() {
        let path = document_path("state.json").unwrap();
        assert!(path.ends_with("talon/state.json"));
    }

    #[test]
    fn test_missing_document_does_not_exist() {
        assert!(!document_exists("no-such-document.json"));
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        write_json(&path, &vec!["a".to_string(), "b".to_string()]).unwrap();
        let loaded: Vec<String> = read_json(&path).unwrap();
        assert_eq!(loaded, vec!["a", "b"]);
    }

    #[test]
    fn test_read_missing_file_fails_with_path() {
        let error = read_json::<Vec<String>>(Path::new("/no/such/file.json")).unwrap_err();
        assert!(error.to_string().contains("/no/such/file.json"));
    }
}
