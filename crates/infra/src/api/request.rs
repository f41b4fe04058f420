//! Logical request description
//!
//! A [`RequestSpec`] is built per call by a resource method and consumed by
//! the dispatcher. It is transient and never retained.

use gttx_domain::{GttxError, Result};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Method, path, parameters and whether a token must be attached
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub requires_auth: bool,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, requires_auth: false }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Mark the request as needing an `Authorization` header
    pub fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append the fields of `params` as query pairs.
    ///
    /// Strings go out verbatim, numbers and booleans as their JSON text,
    /// arrays and objects as a JSON-encoded string. Null fields are skipped.
    ///
    /// # Errors
    /// Returns `GttxError::Config` if `params` does not serialize to a JSON
    /// object.
    pub fn with_query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self> {
        let value = serde_json::to_value(params)
            .map_err(|e| GttxError::Config(format!("cannot encode query parameters: {e}")))?;

        match value {
            Value::Object(fields) => {
                for (key, value) in fields {
                    if let Some(encoded) = encode_query_value(value) {
                        self.query.push((key, encoded));
                    }
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(GttxError::Config(format!(
                "query parameters must serialize to an object, got {other}"
            ))),
        }
    }

    /// Send `params` as the JSON request body.
    ///
    /// # Errors
    /// Returns `GttxError::Config` if `params` cannot be serialized.
    pub fn with_json_body<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self> {
        let value = serde_json::to_value(params)
            .map_err(|e| GttxError::Config(format!("cannot encode request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }
}

fn encode_query_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}
