//! Comment repository.
//!
//! Comments reference their article by `page_id` with no foreign key. They
//! are destroyed only by the sweep that follows an article delete.

use blog_core::entities::{Comment, CommentAuthor};
use blog_core::validate::{FieldRule, FieldType, Validator};
use serde_json::json;

use crate::error::{DatabaseError, ServiceError};
use crate::helpers::{format_datetime, get_opt_string, now, parse_datetime, placeholders, text_values};
use crate::inputs::CommentInput;
use crate::service::BlogService;

const SELECT_COLS: &str = "id, page_id, content, author, email, site, created_at";

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    Ok(Comment {
        id: row.get(0)?,
        page_id: row.get(1)?,
        content: row.get(2)?,
        author: CommentAuthor {
            name: row.get(3)?,
            email: get_opt_string(row, 4)?,
            site: get_opt_string(row, 5)?,
        },
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn rules() -> Validator {
    Validator::new()
        .rule(
            "pageId",
            FieldRule::new(FieldType::ObjectId)
                .required()
                .required_message("comment article id is required")
                .type_message("unexpected comment article id"),
        )
        .rule(
            "content",
            FieldRule::new(FieldType::String)
                .required()
                .message("comment content is required"),
        )
}

impl BlogService {
    /// Store a comment and bump the article's comment counter.
    ///
    /// # Errors
    ///
    /// `Validation` for a missing/malformed page id or empty content,
    /// `NotFound` when the article does not exist.
    pub async fn create_comment(&self, input: &CommentInput) -> Result<Comment, ServiceError> {
        rules().validate(
            &json!({ "pageId": input.page_id, "content": input.content }),
            &["pageId", "content"],
        )?;
        let page_id = input.page_id.clone().unwrap_or_default();
        let content = input.content.clone().unwrap_or_default();
        let id = self.db().generate_id().await?;
        let now = now();
        let tx = self.db().transaction().await?;
        if !self.article_exists(&page_id).await? {
            return Err(ServiceError::not_found("Article", page_id));
        }
        tx.execute(
            &format!("INSERT INTO comments ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            libsql::params![
                id.as_str(),
                page_id.as_str(),
                content.as_str(),
                input.author.name.as_str(),
                input.author.email.as_deref(),
                input.author.site.as_deref(),
                format_datetime(&now)
            ],
        )
        .await?;
        tx.execute(
            "UPDATE articles SET comments = comments + 1 WHERE id = ?1",
            [page_id.as_str()],
        )
        .await?;
        tx.commit().await?;

        tracing::info!(id = %id, page_id = %page_id, "comment created");
        Ok(Comment {
            id,
            page_id,
            content,
            author: input.author.clone(),
            created_at: now,
        })
    }

    /// Comments of one article, newest first.
    ///
    /// # Errors
    ///
    /// `Validation` for a missing or malformed page id.
    pub async fn list_comments(&self, page_id: &str) -> Result<Vec<Comment>, ServiceError> {
        rules().validate(&json!({ "pageId": page_id }), &["pageId"])?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM comments WHERE page_id = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                [page_id],
            )
            .await?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next().await? {
            comments.push(row_to_comment(&row)?);
        }
        Ok(comments)
    }

    /// Delete every comment owned by one of `article_ids`.
    ///
    /// Returns the number of comments removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_comments_for_articles(
        &self,
        article_ids: &[String],
    ) -> Result<u64, DatabaseError> {
        if article_ids.is_empty() {
            return Ok(0);
        }
        let _writer = self.db().write_lock().await;
        Ok(self
            .db()
            .conn()
            .execute(
                &format!(
                    "DELETE FROM comments WHERE page_id IN ({})",
                    placeholders(1, article_ids.len())
                ),
                libsql::params_from_iter(text_values(article_ids)),
            )
            .await?)
    }
}
