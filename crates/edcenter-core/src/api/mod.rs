//! REST API client module for the educational center backend.
//!
//! This module provides the `ApiClient` gateway, which attaches bearer
//! credentials to every request and transparently refreshes them once
//! when the backend rejects a request with 401. Account and resource
//! endpoints are typed wrappers on top of it.

pub mod auth;
pub mod client;
pub mod error;
pub mod request;
pub mod resources;


pub use client::{ApiClient, ClientSettings, RefreshMode, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use request::ApiRequest;
