//! Whole-file JSON list persistence shared by the file-backed stores.
//!
//! Each storage key maps to one `<dir>/<key>.json` file holding a JSON array.
//! Reads fail soft; writes go to a sibling temp file that is renamed over the
//! target.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::core::NotifyError;

/// Path of the file backing `key` inside `dir`, creating `dir` if needed.
pub fn key_path(dir: impl AsRef<Path>, key: &str) -> Result<PathBuf, NotifyError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| NotifyError::Storage(e.to_string()))?;
    Ok(dir.join(format!("{key}.json")))
}

/// Read the list stored at `path`; empty when missing or malformed.
pub fn read_list<T>(path: &Path) -> Vec<T>
where
    T: DeserializeOwned,
{
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read stored list");
            return Vec::new();
        }
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "discarding malformed stored list");
        Vec::new()
    })
}

/// Replace the list stored at `path`.
pub fn write_list<T>(path: &Path, items: &[T]) -> Result<(), NotifyError>
where
    T: Serialize,
{
    let body = serde_json::to_vec(items).map_err(|e| NotifyError::Storage(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body).map_err(|e| NotifyError::Storage(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| NotifyError::Storage(e.to_string()))
}
