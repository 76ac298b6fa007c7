use std::sync::Mutex;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// The persisted session entries. All three are cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl StoredSession {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

/// Durable key-value storage for session credentials.
///
/// The API client is handed one of these at construction and never
/// touches any other credential state.
pub trait SessionStore: Send + Sync {
    /// Read the current entries. Missing entries are `None`, not errors.
    fn load(&self) -> Result<StoredSession>;

    /// Replace all entries with `session`.
    fn save(&self, session: &StoredSession) -> Result<()>;

    /// Remove all entries.
    fn clear(&self) -> Result<()>;
}

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<StoredSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    pub fn with_tokens(access_token: Option<&str>, refresh_token: Option<&str>) -> Self {
        Self::with_session(StoredSession {
            access_token: access_token.map(str::to_string),
            refresh_token: refresh_token.map(str::to_string),
            user: None,
        })
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<StoredSession> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Session store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Session store lock poisoned"))?;
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.save(&StoredSession::default())
    }
}
