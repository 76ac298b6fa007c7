//! Authentication module for managing session credentials.
//!
//! This module provides:
//! - `SessionStore`: injectable load/save/clear interface over the three
//!   persisted session entries (access token, refresh token, cached user)
//! - `MemorySessionStore`, `FileSessionStore`, `KeyringSessionStore`:
//!   process-local, on-disk and OS keychain backends
//! - `SessionEvent`: notifications emitted by the API client when the
//!   session starts, refreshes, or ends
//! - `token`: JWT expiry inspection

pub mod credentials;
pub mod events;
pub mod session;
pub mod store;
pub mod token;

pub use credentials::KeyringSessionStore;
pub use events::{SessionEvent, TerminationReason};
pub use session::FileSessionStore;
pub use store::{MemorySessionStore, SessionStore, StoredSession};
