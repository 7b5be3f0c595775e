use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::term::{Category, Tag};
use crate::enums::ArticleState;

/// Thumbnail attached to an article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Thumb {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub size: u64,
}

/// Free-form key/value metadata, e.g. `{ "key": "color", "value": "#fff" }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Extend {
    pub key: String,
    pub value: String,
}

/// Article counters. Only ever incremented, except on reset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArticleMeta {
    pub visits: u64,
    pub likes: u64,
    pub comments: u64,
}

/// A stored article, with category and tags held as ids.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub rendered_content: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tag: Vec<String>,
    pub thumb: Option<Thumb>,
    pub keywords: Vec<String>,
    pub extends: Vec<Extend>,
    pub state: ArticleState,
    pub meta: ArticleMeta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An article as returned to a caller: projected and with references populated.
///
/// Fields excluded by the projection are `None` and left out of the JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<Thumb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<Extend>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ArticleState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ArticleMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Light projection used for "related articles".
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelatedArticle {
    pub id: String,
    pub title: String,
    pub thumb: Option<Thumb>,
    pub meta: ArticleMeta,
    pub created_at: DateTime<Utc>,
}

/// Light projection used for previous/next navigation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiblingArticle {
    pub id: String,
    pub title: String,
    pub thumb: Option<Thumb>,
    pub created_at: DateTime<Utc>,
}

/// Closest earlier (`prev`) and later (`next`) articles by creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Sibling {
    pub prev: Option<SiblingArticle>,
    pub next: Option<SiblingArticle>,
}

/// Single-article read: the article plus its derived relationships.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: ArticleView,
    pub related: Vec<RelatedArticle>,
    pub sibling: Sibling,
}
