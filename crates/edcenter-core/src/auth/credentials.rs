use anyhow::{Context, Result};
use keyring::Entry;

use super::store::{SessionStore, StoredSession};

const SERVICE_NAME: &str = "edcenter";

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_KEY: &str = "user";

/// Session entries kept in the OS keychain, one entry per key.
pub struct KeyringSessionStore {
    service: String,
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl KeyringSessionStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service, key).context("Failed to create keyring entry")
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {} from keychain", key)),
        }
    }

    fn set(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self
                .entry(key)?
                .set_password(value)
                .with_context(|| format!("Failed to store {} in keychain", key)),
            None => self.delete(key),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {} from keychain", key)),
        }
    }
}

impl SessionStore for KeyringSessionStore {
    fn load(&self) -> Result<StoredSession> {
        let user = match self.get(USER_KEY)? {
            Some(json) => Some(serde_json::from_str(&json).context("Failed to parse cached user")?),
            None => None,
        };
        Ok(StoredSession {
            access_token: self.get(ACCESS_TOKEN_KEY)?,
            refresh_token: self.get(REFRESH_TOKEN_KEY)?,
            user,
        })
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        let user = session.user.as_ref().map(serde_json::to_string).transpose()?;
        self.set(ACCESS_TOKEN_KEY, session.access_token.as_deref())?;
        self.set(REFRESH_TOKEN_KEY, session.refresh_token.as_deref())?;
        self.set(USER_KEY, user.as_deref())?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.delete(ACCESS_TOKEN_KEY)?;
        self.delete(REFRESH_TOKEN_KEY)?;
        self.delete(USER_KEY)?;
        Ok(())
    }
}
