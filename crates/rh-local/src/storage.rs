//! String key-value store persisted as one JSON file.
//!
//! Every call reads the file afresh and every write replaces it atomically,
//! so several handles on the same directory never clobber each other's keys.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rh_config::StorageConfig;

use crate::error::LocalError;

const STORAGE_FILE_NAME: &str = "storage.json";

type Entries = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.resolved_data_dir())
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE_NAME)
    }

    /// # Errors
    ///
    /// Returns [`LocalError`] if the storage file exists but can't be read
    /// or isn't a JSON object of strings.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, LocalError> {
        Ok(self.read_entries()?.remove(key))
    }

    /// # Errors
    ///
    /// Returns [`LocalError::Io`] if the storage file can't be written.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), LocalError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    /// Remove a key. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`LocalError::Io`] if the storage file can't be written.
    pub fn remove_item(&self, key: &str) -> Result<(), LocalError> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`LocalError`] if the storage file can't be read.
    pub fn keys(&self) -> Result<Vec<String>, LocalError> {
        Ok(self.read_entries()?.into_keys().collect())
    }

    fn read_entries(&self) -> Result<Entries, LocalError> {
        let path = self.path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(LocalError::io(path, e)),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|source| LocalError::Corrupt {
            key: STORAGE_FILE_NAME.to_string(),
            source,
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), LocalError> {
        fs::create_dir_all(&self.dir).map_err(|e| LocalError::io(&self.dir, e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }

        let path = self.path();
        let json = serde_json::to_string_pretty(entries)?;
        let mut tmp =
            tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| LocalError::io(&self.dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| LocalError::io(tmp.path(), e))?;
        // The session token lives here.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))
                .map_err(|e| LocalError::io(tmp.path(), e))?;
        }
        tmp.persist(&path)
            .map_err(|e| LocalError::io(&path, e.error))?;
        tracing::debug!(path = %path.display(), keys = entries.len(), "local storage written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get_item("anything").unwrap(), None);
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));

        storage.remove_item("a").unwrap();
        storage.remove_item("never-set").unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["b"]);
    }

    #[test]
    fn handles_share_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = LocalStorage::new(dir.path());
        let second = LocalStorage::new(dir.path());
        first.set_item("x", "1").unwrap();
        second.set_item("y", "2").unwrap();
        assert_eq!(first.keys().unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORAGE_FILE_NAME), "not json").unwrap();
        let err = LocalStorage::new(dir.path()).get_item("a").unwrap_err();
        assert!(matches!(err, LocalError::Corrupt { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.set_item("auth_token", "secret").unwrap();
        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
