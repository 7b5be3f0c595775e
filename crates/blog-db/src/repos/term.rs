//! SQL shared by categories and tags.
//!
//! Both tables have the same columns; [`TermKind`] picks the table and the
//! article-count subquery.

use std::collections::HashMap;

use blog_core::entities::{Category, Extend, Tag};
use blog_core::ids::is_identifier;
use blog_core::validate::{FieldRule, FieldType, Validator};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::{DatabaseError, ServiceError};
use crate::helpers::{
    format_datetime, get_opt_string, now, parse_datetime, parse_json_column, placeholders,
    text_values, to_json_column,
};
use crate::inputs::TermInput;
use crate::service::BlogService;

const SELECT_COLS: &str = "c.id, c.name, c.description, c.extends, c.created_at, c.updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TermKind {
    Category,
    Tag,
}

impl TermKind {
    pub(crate) const fn table(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Tag => "tags",
        }
    }

    pub(crate) const fn entity(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Tag => "Tag",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tag => "tag",
        }
    }

    /// Correlated count of articles referencing `c.id`.
    fn count_subquery(self, published_only: bool) -> String {
        let state = if published_only { " AND a.state = 1" } else { "" };
        match self {
            Self::Category => {
                format!("(SELECT count(*) FROM articles a WHERE a.category_id = c.id{state})")
            }
            Self::Tag => format!(
                "(SELECT count(*) FROM article_tags t JOIN articles a ON a.id = t.article_id \
                 WHERE t.tag_id = c.id{state})"
            ),
        }
    }

    fn rules(self) -> Validator {
        let label = self.label();
        Validator::new()
            .rule(
                "id",
                FieldRule::new(FieldType::ObjectId)
                    .required()
                    .required_message(format!("{label} id is required"))
                    .type_message(format!("unexpected {label} id")),
            )
            .rule(
                "name",
                FieldRule::new(FieldType::String)
                    .required()
                    .message(format!("{label} name is required")),
            )
    }
}

/// Column set common to categories and tags.
#[derive(Debug, Clone)]
pub(crate) struct TermRecord {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) extends: Vec<Extend>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl TermRecord {
    pub(crate) fn into_category(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            description: self.description,
            extends: self.extends,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub(crate) fn into_tag(self) -> Tag {
        Tag {
            id: self.id,
            name: self.name,
            description: self.description,
            extends: self.extends,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn row_to_term(row: &libsql::Row) -> Result<TermRecord, DatabaseError> {
    Ok(TermRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
        extends: parse_json_column(get_opt_string(row, 3)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl BlogService {
    pub(crate) async fn create_term(
        &self,
        kind: TermKind,
        input: &TermInput,
    ) -> Result<TermRecord, ServiceError> {
        kind.rules()
            .validate(&json!({ "name": input.name }), &["name"])?;
        let name = input.name.as_deref().unwrap_or_default();

        let _writer = self.db().write_lock().await;
        if self.find_term_by_name(kind, name).await?.is_some() {
            return Err(ServiceError::Validation(format!(
                "{} '{name}' already exists",
                kind.entity()
            )));
        }

        let id = self.db().generate_id().await?;
        let now = now();
        let extends = input.extends.clone().unwrap_or_default();
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO {} (id, name, description, extends, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    kind.table()
                ),
                libsql::params![
                    id.as_str(),
                    name,
                    input.description.as_deref(),
                    to_json_column(&extends)?,
                    format_datetime(&now),
                    format_datetime(&now)
                ],
            )
            .await?;

        Ok(TermRecord {
            id,
            name: name.to_string(),
            description: input.description.clone(),
            extends,
            created_at: now,
            updated_at: now,
        })
    }

    pub(crate) async fn get_term(&self, kind: TermKind, id: &str) -> Result<TermRecord, ServiceError> {
        kind.rules().validate(&json!({ "id": id }), &["id"])?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM {} c WHERE c.id = ?1", kind.table()),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row_to_term(&row)?),
            None => Err(ServiceError::not_found(kind.entity(), id)),
        }
    }

    /// Terms ordered by creation, each with its article count.
    pub(crate) async fn list_terms(
        &self,
        kind: TermKind,
        published_only: bool,
    ) -> Result<Vec<(TermRecord, u64)>, ServiceError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS}, {} FROM {} c ORDER BY c.created_at, c.rowid",
                    kind.count_subquery(published_only),
                    kind.table()
                ),
                (),
            )
            .await?;
        let mut terms = Vec::new();
        while let Some(row) = rows.next().await? {
            let count = u64::try_from(row.get::<i64>(6)?).unwrap_or_default();
            terms.push((row_to_term(&row)?, count));
        }
        Ok(terms)
    }

    /// Delete a term. Articles keep their (now dangling) references.
    pub(crate) async fn delete_term(&self, kind: TermKind, id: &str) -> Result<(), ServiceError> {
        kind.rules().validate(&json!({ "id": id }), &["id"])?;
        let _writer = self.db().write_lock().await;
        let deleted = self
            .db()
            .conn()
            .execute(&format!("DELETE FROM {} WHERE id = ?1", kind.table()), [id])
            .await?;
        if deleted == 0 {
            return Err(ServiceError::not_found(kind.entity(), id));
        }
        Ok(())
    }

    pub(crate) async fn find_term_by_name(
        &self,
        kind: TermKind,
        name: &str,
    ) -> Result<Option<TermRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM {} c WHERE c.name = ?1", kind.table()),
                [name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_term(&row)?)),
            None => Ok(None),
        }
    }

    /// Batch lookup by id set. Ids with no row are absent from the map.
    pub(crate) async fn terms_by_ids(
        &self,
        kind: TermKind,
        ids: &[String],
    ) -> Result<HashMap<String, TermRecord>, DatabaseError> {
        let ids: Vec<&String> = ids.iter().filter(|id| is_identifier(id)).collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM {} c WHERE c.id IN ({})",
                    kind.table(),
                    placeholders(1, ids.len())
                ),
                libsql::params_from_iter(text_values(&ids)),
            )
            .await?;
        let mut terms = HashMap::new();
        while let Some(row) = rows.next().await? {
            let term = row_to_term(&row)?;
            terms.insert(term.id.clone(), term);
        }
        Ok(terms)
    }
}
