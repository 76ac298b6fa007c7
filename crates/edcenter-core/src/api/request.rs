//! Outbound request descriptor.
//!
//! An `ApiRequest` captures everything needed to (re)send a call to the
//! backend: method, path segments relative to the base URL, query
//! parameters, extra headers and an optional JSON body. Segments are kept
//! raw and percent-encoded when the URL is built, so ids cannot change
//! the route. The `retried` flag marks a descriptor that has already been
//! resent after a credential refresh.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub(crate) retried: bool,
}

impl ApiRequest {
    /// `path` is a fixed route such as `/auth/login`; use `segment` for
    /// values that come from callers.
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one path segment, taken literally
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Unencoded path, for logging
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Append a single query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append query parameters from a serializable filter struct.
    ///
    /// Null fields are skipped; scalars are rendered with their JSON text
    /// (strings without quotes).
    pub fn query_params<Q: Serialize>(mut self, params: &Q) -> Result<Self, ApiError> {
        if let Value::Object(map) = serde_json::to_value(params)? {
            for (key, value) in map {
                let rendered = match value {
                    Value::Null => continue,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                self.query.push((key, rendered));
            }
        }
        Ok(self)
    }

    pub fn header(mut self, name: HeaderName, value: &str) -> Result<Self, ApiError> {
        self.headers.insert(name, HeaderValue::from_str(value)?);
        Ok(self)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Mark the descriptor as already retried so a second 401 is final.
    pub fn mark_retried(&mut self) {
        self.retried = true;
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }
}
