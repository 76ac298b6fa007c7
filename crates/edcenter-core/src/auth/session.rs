use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::store::{SessionStore, StoredSession};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Session entries persisted as JSON in the cache directory.
pub struct FileSessionStore {
    cache_dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }

    fn read(path: &Path) -> Result<StoredSession> {
        let contents = std::fs::read_to_string(path).context("Failed to read session file")?;
        serde_json::from_str(&contents).context("Failed to parse session file")
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<StoredSession> {
        let path = self.path();
        if !path.exists() {
            return Ok(StoredSession::default());
        }
        Self::read(&path)
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        if session.is_empty() {
            return self.clear();
        }
        let path = self.path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create session directory")?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&path, contents).context("Failed to write session file")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested"));

        assert_eq!(store.load().unwrap(), StoredSession::default());

        let session = StoredSession {
            access_token: Some("access".to_string()),
            refresh_token: Some("refresh".to_string()),
            user: Some(User {
                id: "1".to_string(),
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
                role: "admin".to_string(),
            }),
        };
        store.save(&session).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), session);

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_saving_empty_session_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());
        store
            .save(&StoredSession {
                access_token: Some("a".to_string()),
                ..Default::default()
            })
            .unwrap();
        store.save(&StoredSession::default()).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_session_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());
        std::fs::write(store.path(), "not json").unwrap();
        assert!(store.load().is_err());
    }
}
