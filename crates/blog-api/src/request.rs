//! Transport-neutral request.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::method::Method;

/// One inbound request. `authorized` is decided by the caller.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub body: Value,
    pub authorized: bool,
}

impl Request {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            body: Value::Null,
            authorized: false,
        }
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub const fn authorized(mut self, authorized: bool) -> Self {
        self.authorized = authorized;
        self
    }

    /// Add `key=value` query pairs.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MalformedQuery` for a pair without `=`.
    pub fn with_query_pairs<I, S>(mut self, pairs: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ApiError::MalformedQuery(pair.to_string()))?;
            self.query.insert(key.to_string(), value.to_string());
        }
        Ok(self)
    }

    /// The query string as a JSON object of strings.
    #[must_use]
    pub fn query_object(&self) -> Value {
        Value::Object(
            self.query
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<Map<String, Value>>(),
        )
    }
}
