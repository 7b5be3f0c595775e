//! Response shapes returned by every operation.
//!
//! All outcomes funnel into [`Envelope`]: `{code, message, data}` on success
//! and `{code, message, error}` on failure. Payload structs for list, archive,
//! and statistics reads live here too.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::entities::{ArticleMeta, Category, Tag};

/// Envelope code for a successful operation.
pub const CODE_SUCCESS: i32 = 200;

/// Envelope code for a failed operation.
pub const CODE_FAILED: i32 = -1;

/// Uniform outcome of a request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Envelope {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl Envelope {
    #[must_use]
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        let data = if data.is_null() { json!({}) } else { data };
        Self {
            code: CODE_SUCCESS,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Failure envelope. `detail` is attached as `error.detail` when present.
    #[must_use]
    pub fn failure(message: impl Into<String>, detail: Option<String>) -> Self {
        let error = detail.map_or_else(|| json!({}), |detail| json!({ "detail": detail }));
        Self {
            code: CODE_FAILED,
            message: message.into(),
            data: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}

/// Pagination block attached to list reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_count: u64,
    pub current_page: u32,
    pub total_page: u32,
    pub page_size: u32,
}

impl Pagination {
    /// Build the block for `total` items at `page` of `page_size`.
    ///
    /// `current_page` is clamped to `total_page` once the caller pages past
    /// the end (and stays at the requested page while there are no items).
    #[must_use]
    pub fn new(total: u64, page: u32, page_size: u32) -> Self {
        let total_page = if page_size == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
        };
        let current_page = if total_page > 0 && page > total_page {
            total_page
        } else {
            page
        };
        Self {
            total_count: total,
            current_page,
            total_page,
            page_size,
        }
    }
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub pagination: Pagination,
}

/// One article inside an archive year.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub id: String,
    pub title: String,
    pub category: Option<Category>,
    pub tag: Vec<Tag>,
    pub meta: ArticleMeta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Articles created in one calendar year (UTC).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArchiveYear {
    pub year: i32,
    pub list: Vec<ArchiveEntry>,
}

/// Entity totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Statistics {
    pub article: u64,
    pub category: u64,
    pub tag: u64,
}

/// A category or tag with the number of articles referencing it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Counted<T> {
    #[serde(flatten)]
    pub item: T,
    pub count: u64,
}
