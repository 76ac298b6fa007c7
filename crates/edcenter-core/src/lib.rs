//! Core library for edcenter.
//!
//! Provides the authenticated API client for an educational center's
//! backend (students, teachers, classes, subjects, payments), the
//! pluggable session credential store it runs on, the data models, and
//! configuration loading.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, ApiRequest, ClientSettings, RefreshMode};
pub use auth::{SessionEvent, SessionStore, StoredSession, TerminationReason};
pub use config::Config;
