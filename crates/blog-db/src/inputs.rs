//! Typed request payloads and list parameters.
//!
//! Inbound bodies arrive as JSON. Shape errors (a string where an array is
//! expected, and so on) are reported as `ServiceError::Validation`. Fields
//! whose coercion rules are part of an operation's semantics (`state`,
//! `page`, `pageSize`, `hot`, `sort`) stay as raw JSON values and are parsed
//! by the operation itself.

use blog_core::entities::{CommentAuthor, Extend, Thumb};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceError;

/// Decode a request body. `null` is treated as an empty object.
///
/// # Errors
///
/// Returns `ServiceError::Validation` when the body does not fit `T`.
pub fn from_body<T: DeserializeOwned>(body: &Value) -> Result<T, ServiceError> {
    let body = if body.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        body.clone()
    };
    serde_json::from_value(body).map_err(|e| ServiceError::Validation(format!("invalid payload: {e}")))
}

/// Parameters of the article list read.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<Value>,
    pub page_size: Option<Value>,
    pub state: Option<Value>,
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub hot: Option<Value>,
    /// Sort descriptor object, or its JSON-serialized string form.
    pub sort: Option<Value>,
}

/// Parameters of the archive read.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<Value>,
    pub page_size: Option<Value>,
}

/// Article-shaped write payload for create and full update.
///
/// `category` and `tag` entries may be identifiers or names.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tag: Option<Vec<String>>,
    pub thumb: Option<Thumb>,
    pub keywords: Option<Vec<String>>,
    pub extends: Option<Vec<Extend>>,
    pub state: Option<Value>,
}

/// Single-article state patch.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StateInput {
    pub state: Option<Value>,
}

/// Bulk state change or bulk delete.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkInput {
    #[serde(default)]
    pub article_ids: Vec<String>,
    pub state: Option<Value>,
}

/// Category or tag write payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TermInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub extends: Option<Vec<Extend>>,
}

/// Comment write payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    pub page_id: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub author: CommentAuthor,
}
