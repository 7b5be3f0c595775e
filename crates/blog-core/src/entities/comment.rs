use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Who wrote a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CommentAuthor {
    pub name: String,
    pub email: Option<String>,
    pub site: Option<String>,
}

/// A reader comment on an article. Destroyed only with its owning article.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    /// Owning article id.
    pub page_id: String,
    pub content: String,
    pub author: CommentAuthor,
    pub created_at: DateTime<Utc>,
}
