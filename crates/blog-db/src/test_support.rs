//! Shared test utilities for blog-db unit tests.

use blog_config::BlogSettings;
use serde_json::json;

use crate::BlogDb;
use crate::inputs::{ArticleInput, TermInput};
use crate::service::BlogService;

/// In-memory service with default settings.
pub async fn test_service() -> BlogService {
    let db = BlogDb::open_local(":memory:").await.unwrap();
    BlogService::from_db(db, BlogSettings::default())
}

pub fn article(title: &str, content: &str) -> ArticleInput {
    ArticleInput {
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        ..ArticleInput::default()
    }
}

pub fn published(title: &str) -> ArticleInput {
    ArticleInput {
        state: Some(json!(1)),
        ..article(title, "body")
    }
}

pub fn term(name: &str) -> TermInput {
    TermInput {
        name: Some(name.to_string()),
        ..TermInput::default()
    }
}

/// Overwrite an article's creation time (sibling and archive tests).
pub async fn set_created_at(svc: &BlogService, id: &str, ts: &str) {
    svc.db()
        .conn()
        .execute(
            "UPDATE articles SET created_at = ?1 WHERE id = ?2",
            libsql::params![ts, id],
        )
        .await
        .unwrap();
}
