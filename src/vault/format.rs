//! On-disk JSON files (`items.json`, `users.json`).
//!
//! Files are pretty-printed JSON, the same layout earlier releases wrote,
//! so existing data directories keep loading.  Writes go through a temp
//! file and a rename so readers never see a half-written file.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, VaultError};

/// Read a JSON document, or `T::default()` when the file does not exist.
pub fn read_json<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let data = fs::read(path)?;
    serde_json::from_slice(&data).map_err(|e| {
        VaultError::SerializationError(format!("{}: {e}", path.display()))
    })
}

/// Write a JSON document to disk **atomically**.
///
/// 1. Serialize to pretty JSON.
/// 2. Write to a temp file in the same directory.
/// 3. Rename the temp file over the target path.
pub fn write_json_atomic<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| VaultError::SerializationError(format!("{}: {e}", path.display())))?;

    let parent = path.parent().unwrap_or(Path::new("."));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }

    // Same directory, so the rename stays on one filesystem.
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_default() {
        let dir = TempDir::new().unwrap();
        let items: Vec<String> = read_json(&dir.path().join("nope.json")).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn write_then_read_and_no_temp_left() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let mut map = BTreeMap::new();
        map.insert("k".to_string(), 1u32);
        write_json_atomic(&path, &map).unwrap();

        let back: BTreeMap<String, u32> = read_json(&path).unwrap();
        assert_eq!(back, map);
        assert!(!path.parent().unwrap().join(".data.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Vec<String>> = read_json(&path);
        assert!(matches!(result, Err(VaultError::SerializationError(_))));
    }

    #[cfg(unix)]
    #[test]
    fn written_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        write_json_atomic(&path, &Vec::<String>::new()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
