//! Article repository: the lifecycle (create, update, state changes,
//! cascading delete) and the read paths (list, detail, like).
//!
//! Category and tag references are resolved on every write and dropped
//! when they do not name an existing entity. Rendered content is computed
//! from `content` on every content-bearing write and only ever served from
//! the cache.

use std::collections::HashMap;

use blog_core::entities::{Article, ArticleDetail, ArticleMeta, ArticleView};
use blog_core::enums::ArticleState;
use blog_core::ids::{NOT_FOUND_ID, is_sentinel};
use blog_core::render::render;
use blog_core::responses::{Page, Pagination};
use blog_core::validate::{FieldRule, FieldType, Validator};
use serde_json::{Value, json};

use crate::error::{DatabaseError, ServiceError};
use crate::helpers::{
    format_datetime, get_counter, get_opt_string, now, parse_datetime, parse_json_column,
    placeholders, text_values, to_json_column,
};
use crate::inputs::{ArticleInput, ListParams};
use crate::query::Projection;
use crate::service::BlogService;

pub(crate) const SELECT_COLS: &str = "id, title, content, rendered_content, description, category_id, \
     thumb, keywords, extends, state, visits, likes, comments, created_at, updated_at";

const ENTITY: &str = "Article";

pub(crate) fn row_to_article(row: &libsql::Row) -> Result<Article, DatabaseError> {
    let state = ArticleState::try_from(row.get::<i64>(9)?).map_err(DatabaseError::InvalidState)?;
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        rendered_content: row.get(3)?,
        description: get_opt_string(row, 4)?,
        category: get_opt_string(row, 5)?,
        tag: Vec::new(),
        thumb: parse_json_column(get_opt_string(row, 6)?.as_deref())?,
        keywords: parse_json_column(get_opt_string(row, 7)?.as_deref())?,
        extends: parse_json_column(get_opt_string(row, 8)?.as_deref())?,
        state,
        meta: ArticleMeta {
            visits: get_counter(row, 10)?,
            likes: get_counter(row, 11)?,
            comments: get_counter(row, 12)?,
        },
        created_at: parse_datetime(&row.get::<String>(13)?)?,
        updated_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

fn rules() -> Validator {
    Validator::new()
        .rule(
            "id",
            FieldRule::new(FieldType::ObjectId)
                .required()
                .required_message("article id is required")
                .type_message("unexpected article id"),
        )
        .rule(
            "title",
            FieldRule::new(FieldType::String)
                .required()
                .message("article title is required"),
        )
        .rule(
            "content",
            FieldRule::new(FieldType::String)
                .required()
                .message("article content is required"),
        )
        .rule(
            "articleIds",
            FieldRule::new(FieldType::Array)
                .required()
                .message("no articles selected"),
        )
}

fn validate_id(id: &str) -> Result<(), ServiceError> {
    rules().validate(&json!({ "id": id }), &["id"])?;
    Ok(())
}

fn validate_ids(ids: &[String]) -> Result<(), ServiceError> {
    rules().validate(&json!({ "articleIds": ids }), &["articleIds"])?;
    ids.iter().try_for_each(|id| validate_id(id))
}

/// Parse an inbound state against the states an operation allows.
///
/// `None` (absent or `null`) passes through; anything unrecognized fails.
fn parse_state(
    raw: Option<&Value>,
    allowed: &[ArticleState],
) -> Result<Option<ArticleState>, ServiceError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => ArticleState::from_raw(raw)
            .filter(|s| allowed.contains(s))
            .map(Some)
            .ok_or_else(|| ServiceError::Validation("unknown article state".to_string())),
    }
}

/// Replace an article's ordered tag set.
async fn write_tags(
    conn: &libsql::Connection,
    article_id: &str,
    tag_ids: &[String],
) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM article_tags WHERE article_id = ?1", [article_id])
        .await?;
    for (position, tag_id) in (0_i64..).zip(tag_ids) {
        conn.execute(
            "INSERT INTO article_tags (article_id, tag_id, position) VALUES (?1, ?2, ?3)",
            libsql::params![article_id, tag_id.as_str(), position],
        )
        .await?;
    }
    Ok(())
}

impl BlogService {
    /// Create an article.
    ///
    /// The state defaults to draft. Category and tags that do not name an
    /// existing entity are dropped.
    ///
    /// # Errors
    ///
    /// `Validation` for a missing title or content, or an unknown state.
    pub async fn create_article(&self, input: &ArticleInput) -> Result<ArticleView, ServiceError> {
        rules().validate(
            &json!({ "title": input.title, "content": input.content }),
            &["title", "content"],
        )?;
        let state = parse_state(input.state.as_ref(), &ArticleState::ALL)?.unwrap_or_default();
        let title = input.title.as_deref().unwrap_or_default();
        let content = input.content.as_deref().unwrap_or_default();

        let category = match input.category.as_deref() {
            Some(raw) => self.existing_category(raw).await?,
            None => None,
        };
        let tags = match input.tag.as_deref() {
            Some(raw) => self.existing_tags(raw).await?,
            None => Vec::new(),
        };

        let id = self.db().generate_id().await?;
        let now = format_datetime(&now());
        let tx = self.db().transaction().await?;
        tx.execute(
            &format!(
                "INSERT INTO articles ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, 0, 0, ?11, ?12)"
            ),
            libsql::params![
                id.as_str(),
                title,
                content,
                render(content),
                input.description.as_deref(),
                category.as_deref(),
                input.thumb.as_ref().map(to_json_column).transpose()?,
                to_json_column(&input.keywords.clone().unwrap_or_default())?,
                to_json_column(&input.extends.clone().unwrap_or_default())?,
                i64::from(state.as_i8()),
                now.as_str(),
                now.as_str()
            ],
        )
        .await?;
        write_tags(&tx, &id, &tags).await?;
        tx.commit().await?;

        tracing::info!(id = %id, state = %state, "article created");
        self.article_view(&id, Projection::Full).await
    }

    /// Full update of an existing article.
    ///
    /// Title and content are required and the rendered content is always
    /// recomputed. Other fields change only when present. A present category
    /// that does not resolve to an existing one is set to the sentinel id.
    ///
    /// # Errors
    ///
    /// `Validation` for a bad id, missing title/content or unknown state,
    /// `NotFound` when no article has the id.
    pub async fn update_article(
        &self,
        id: &str,
        input: &ArticleInput,
    ) -> Result<ArticleView, ServiceError> {
        rules().validate(
            &json!({ "id": id, "title": input.title, "content": input.content }),
            &["id", "title", "content"],
        )?;
        let state = parse_state(input.state.as_ref(), &ArticleState::ALL)?;
        if !self.article_exists(id).await? {
            return Err(ServiceError::not_found(ENTITY, id));
        }

        let title = input.title.clone().unwrap_or_default();
        let content = input.content.clone().unwrap_or_default();
        let rendered = render(&content);

        let mut sets = vec![
            "title = ?1".to_string(),
            "content = ?2".to_string(),
            "rendered_content = ?3".to_string(),
            "updated_at = ?4".to_string(),
        ];
        let mut params: Vec<libsql::Value> = vec![
            title.into(),
            content.into(),
            rendered.into(),
            format_datetime(&now()).into(),
        ];
        let mut push = |column: &str, value: libsql::Value| {
            params.push(value);
            sets.push(format!("{column} = ?{}", params.len()));
        };

        if let Some(ref description) = input.description {
            push("description", description.clone().into());
        }
        if let Some(ref raw) = input.category {
            let category = self
                .existing_category(raw)
                .await?
                .unwrap_or_else(|| NOT_FOUND_ID.to_string());
            push("category_id", category.into());
        }
        if let Some(ref thumb) = input.thumb {
            push("thumb", to_json_column(thumb)?.into());
        }
        if let Some(ref keywords) = input.keywords {
            push("keywords", to_json_column(keywords)?.into());
        }
        if let Some(ref extends) = input.extends {
            push("extends", to_json_column(extends)?.into());
        }
        if let Some(state) = state {
            push("state", libsql::Value::Integer(i64::from(state.as_i8())));
        }
        let tags = match input.tag.as_deref() {
            Some(raw) => Some(self.existing_tags(raw).await?),
            None => None,
        };

        params.push(id.into());
        let sql = format!(
            "UPDATE articles SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );

        let tx = self.db().transaction().await?;
        tx.execute(&sql, libsql::params_from_iter(params)).await?;
        if let Some(ref tags) = tags {
            write_tags(&tx, id, tags).await?;
        }
        tx.commit().await?;

        tracing::info!(id, "article updated");
        self.article_view(id, Projection::Full).await
    }

    /// Set the state of one article to draft or published.
    ///
    /// Trashing is only reachable through [`Self::bulk_update_state`].
    ///
    /// # Errors
    ///
    /// `Validation` for a bad id or a state outside {0, 1}, `NotFound` when
    /// no article has the id.
    pub async fn patch_article_state(
        &self,
        id: &str,
        state: Option<&Value>,
    ) -> Result<ArticleView, ServiceError> {
        validate_id(id)?;
        let Some(state) = parse_state(state, &ArticleState::PATCHABLE)? else {
            return Err(ServiceError::Validation("unknown article state".to_string()));
        };
        let writer = self.db().write_lock().await;
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE articles SET state = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(state.as_i8()), format_datetime(&now()), id],
            )
            .await?;
        drop(writer);
        if changed == 0 {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        tracing::info!(id, state = %state, "article state changed");
        self.article_view(id, Projection::Full).await
    }

    /// Set the state of many articles at once. Ids that match nothing are
    /// skipped silently.
    ///
    /// Returns the state applied and the number of articles changed.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty id list or a state outside {-1, 0, 1}.
    pub async fn bulk_update_state(
        &self,
        ids: &[String],
        state: Option<&Value>,
    ) -> Result<(ArticleState, u64), ServiceError> {
        validate_ids(ids)?;
        let Some(state) = parse_state(state, &ArticleState::ALL)? else {
            return Err(ServiceError::Validation("unknown article state".to_string()));
        };
        let mut params = vec![
            libsql::Value::Integer(i64::from(state.as_i8())),
            libsql::Value::Text(format_datetime(&now())),
        ];
        params.extend(text_values(ids));
        let _writer = self.db().write_lock().await;
        let changed = self
            .db()
            .conn()
            .execute(
                &format!(
                    "UPDATE articles SET state = ?1, updated_at = ?2 WHERE id IN ({})",
                    placeholders(3, ids.len())
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        tracing::info!(requested = ids.len(), changed, state = %state, "bulk state change");
        Ok((state, changed))
    }

    /// Delete articles and then sweep their comments.
    ///
    /// The sweep runs after the articles are gone and covers exactly the
    /// requested id set. Its failure is logged and does not undo the delete.
    /// Returns the number of articles removed.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty id list, `Storage` if the article delete fails.
    pub async fn delete_articles(&self, ids: &[String]) -> Result<u64, ServiceError> {
        validate_ids(ids)?;
        let writer = self.db().write_lock().await;
        let deleted = self
            .db()
            .conn()
            .execute(
                &format!("DELETE FROM articles WHERE id IN ({})", placeholders(1, ids.len())),
                libsql::params_from_iter(text_values(ids)),
            )
            .await?;
        drop(writer);

        match self.delete_comments_for_articles(ids).await {
            Ok(swept) => tracing::info!(deleted, swept, "articles deleted"),
            Err(error) => {
                tracing::warn!(deleted, %error, "articles deleted but comment sweep failed");
            }
        }
        Ok(deleted)
    }

    /// Delete one article. Deleting an id that matches nothing succeeds.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed id.
    pub async fn delete_article(&self, id: &str) -> Result<(), ServiceError> {
        validate_id(id)?;
        self.delete_articles(&[id.to_string()]).await?;
        Ok(())
    }

    /// Read one article with its related articles and siblings.
    ///
    /// An unauthorized read only sees published articles, omits the raw
    /// content and increments the visit counter once. An authorized read sees
    /// every state and leaves the counter alone.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed id, `NotFound` when the article does not
    /// exist or is not visible to the caller.
    pub async fn get_article_detail(
        &self,
        id: &str,
        authorized: bool,
    ) -> Result<ArticleDetail, ServiceError> {
        validate_id(id)?;
        let sql = if authorized {
            format!("SELECT {SELECT_COLS} FROM articles WHERE id = ?1")
        } else {
            format!(
                "UPDATE articles SET visits = visits + 1 WHERE id = ?1 AND state = 1
                 RETURNING {SELECT_COLS}"
            )
        };
        let writer = if authorized {
            None
        } else {
            Some(self.db().write_lock().await)
        };
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        let mut article = row_to_article(&row)?;
        drop(rows);
        drop(writer);
        self.attach_tag_ids(std::slice::from_mut(&mut article)).await?;

        let related = self.related_articles(&article).await;
        let sibling = self.sibling_articles(&article, authorized).await;

        let projection = if authorized {
            Projection::Full
        } else {
            Projection::Detail
        };
        let view = self
            .populate(vec![article], projection)
            .await?
            .pop()
            .ok_or(DatabaseError::NoResult)?;

        Ok(ArticleDetail {
            article: view,
            related,
            sibling,
        })
    }

    /// One page of articles matching the list parameters.
    ///
    /// # Errors
    ///
    /// `Validation` for bad pagination input, `Storage` on query failure.
    pub async fn list_articles(
        &self,
        params: &ListParams,
        authorized: bool,
    ) -> Result<Page<ArticleView>, ServiceError> {
        let query = self.build_list_query(params, authorized).await?;

        let mut values = Vec::new();
        let where_clause = query.filter.where_clause(&mut values);

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT count(*) FROM articles a {where_clause}"),
                libsql::params_from_iter(values.clone()),
            )
            .await?;
        let total = match rows.next().await? {
            Some(row) => get_counter(&row, 0)?,
            None => 0,
        };

        values.push(libsql::Value::Integer(i64::from(query.limit)));
        values.push(libsql::Value::Integer(
            i64::try_from(query.offset()).unwrap_or(i64::MAX),
        ));
        let n = values.len();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM articles a {where_clause} {} LIMIT ?{} OFFSET ?{n}",
                    query.order_clause(),
                    n - 1
                ),
                libsql::params_from_iter(values),
            )
            .await?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next().await? {
            articles.push(row_to_article(&row)?);
        }

        self.attach_tag_ids(&mut articles).await?;
        let list = self.populate(articles, query.projection).await?;
        Ok(Page {
            list,
            pagination: Pagination::new(total, query.page, query.limit),
        })
    }

    /// Like a published article. Returns the updated counters.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed id, `NotFound` unless the article exists
    /// and is published.
    pub async fn like_article(&self, id: &str) -> Result<ArticleMeta, ServiceError> {
        validate_id(id)?;
        let _writer = self.db().write_lock().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "UPDATE articles SET likes = likes + 1 WHERE id = ?1 AND state = 1
                 RETURNING visits, likes, comments",
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        Ok(ArticleMeta {
            visits: get_counter(&row, 0)?,
            likes: get_counter(&row, 1)?,
            comments: get_counter(&row, 2)?,
        })
    }

    /// Load one stored article with its tag ids.
    ///
    /// # Errors
    ///
    /// `NotFound` when no article has the id.
    pub async fn get_article(&self, id: &str) -> Result<Article, ServiceError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM articles WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        let mut article = row_to_article(&row)?;
        drop(rows);
        let mut tags = self.tag_ids_for(std::slice::from_ref(&article.id)).await?;
        article.tag = tags.remove(&article.id).unwrap_or_default();
        Ok(article)
    }

    pub(crate) async fn article_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM articles WHERE id = ?1", [id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    async fn article_view(&self, id: &str, projection: Projection) -> Result<ArticleView, ServiceError> {
        let article = self.get_article(id).await?;
        self.populate(vec![article], projection)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    /// Resolve a category for a write; `None` unless it names an existing one.
    async fn existing_category(&self, raw: &str) -> Result<Option<String>, DatabaseError> {
        let id = self.resolve_category(raw).await;
        if is_sentinel(&id) {
            return Ok(None);
        }
        let found = self.categories_by_ids(std::slice::from_ref(&id)).await?;
        Ok(found.contains_key(&id).then_some(id))
    }

    /// Resolve tags for a write, keeping only existing ones.
    async fn existing_tags(&self, raw: &[String]) -> Result<Vec<String>, DatabaseError> {
        let ids = self.resolve_tag_list(raw).await;
        let found: HashMap<_, _> = self.tags_by_ids(&ids).await?;
        Ok(ids.into_iter().filter(|id| found.contains_key(id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use blog_core::enums::ArticleState;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::error::ServiceError;
    use crate::inputs::{ArticleInput, ListParams};
    use crate::test_support::{article, published, term, test_service};

    fn validation_message(err: ServiceError) -> String {
        match err {
            ServiceError::Validation(message) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_renders_content_and_defaults_to_draft() {
        let svc = test_service().await;
        let view = svc.create_article(&article("A", "# Hi")).await.unwrap();
        assert_eq!(view.rendered_content.as_deref(), Some("<h1>Hi</h1>\n"));
        assert_eq!(view.state, Some(ArticleState::Draft));
        assert_eq!(view.meta.unwrap().visits, 0);
        assert_eq!(view.tag, Some(vec![]));
        assert!(view.category.is_none());
    }

    #[tokio::test]
    async fn create_keeps_supplied_state() {
        let svc = test_service().await;
        let view = svc.create_article(&published("A")).await.unwrap();
        assert_eq!(view.state, Some(ArticleState::Published));
    }

    #[tokio::test]
    async fn create_requires_title_then_content() {
        let svc = test_service().await;
        let err = svc.create_article(&ArticleInput::default()).await.unwrap_err();
        assert_eq!(validation_message(err), "article title is required");
        let err = svc.create_article(&article("A", "")).await.unwrap_err();
        assert_eq!(validation_message(err), "article content is required");
    }

    #[tokio::test]
    async fn create_rejects_unknown_state() {
        let svc = test_service().await;
        let input = ArticleInput {
            state: Some(json!(5)),
            ..article("A", "b")
        };
        let err = svc.create_article(&input).await.unwrap_err();
        assert_eq!(validation_message(err), "unknown article state");
    }

    #[tokio::test]
    async fn create_drops_unresolvable_references() {
        let svc = test_service().await;
        let rust = svc.create_tag(&term("rust")).await.unwrap();
        let input = ArticleInput {
            category: Some("no-such-category".into()),
            tag: Some(vec![
                "rust".into(),
                "ghost".into(),
                "5a1f9c2e4b0d3a7f8e6c1b2d".into(),
                rust.id.clone(),
            ]),
            ..article("A", "b")
        };
        let view = svc.create_article(&input).await.unwrap();
        assert!(view.category.is_none());
        let tags: Vec<String> = view.tag.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(tags, vec![rust.id]);

        let stored = svc.get_article(&view.id).await.unwrap();
        assert!(stored.category.is_none());
    }

    #[tokio::test]
    async fn create_keeps_tag_order() {
        let svc = test_service().await;
        let a = svc.create_tag(&term("a")).await.unwrap();
        let b = svc.create_tag(&term("b")).await.unwrap();
        let input = ArticleInput {
            tag: Some(vec!["b".into(), "a".into()]),
            ..article("A", "b")
        };
        let view = svc.create_article(&input).await.unwrap();
        let tags: Vec<String> = view.tag.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(tags, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn update_rerenders_and_replaces_tags() {
        let svc = test_service().await;
        let rust = svc.create_tag(&term("rust")).await.unwrap();
        let sql = svc.create_tag(&term("sql")).await.unwrap();
        let created = svc
            .create_article(&ArticleInput {
                tag: Some(vec!["rust".into()]),
                description: Some("keep me".into()),
                ..article("A", "old")
            })
            .await
            .unwrap();

        let updated = svc
            .update_article(
                &created.id,
                &ArticleInput {
                    tag: Some(vec![sql.id.clone(), rust.id.clone()]),
                    ..article("B", "*new*")
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title.as_deref(), Some("B"));
        assert_eq!(updated.rendered_content.as_deref(), Some("<p><em>new</em></p>\n"));
        assert_eq!(updated.description.as_deref(), Some("keep me"));
        let tags: Vec<String> = updated.tag.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(tags, vec![sql.id, rust.id]);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_with_unresolvable_category_sets_sentinel() {
        let svc = test_service().await;
        let cat = svc.create_category(&term("life")).await.unwrap();
        let created = svc
            .create_article(&ArticleInput {
                category: Some(cat.id.clone()),
                ..article("A", "b")
            })
            .await
            .unwrap();
        assert_eq!(created.category.map(|c| c.id), Some(cat.id.clone()));

        let unchanged = svc.update_article(&created.id, &article("A", "b")).await.unwrap();
        assert_eq!(unchanged.category.map(|c| c.id), Some(cat.id));

        let cleared = svc
            .update_article(
                &created.id,
                &ArticleInput {
                    category: Some(String::new()),
                    ..article("A", "b")
                },
            )
            .await
            .unwrap();
        assert!(cleared.category.is_none());
        let stored = svc.get_article(&created.id).await.unwrap();
        assert_eq!(stored.category.as_deref(), Some(blog_core::ids::NOT_FOUND_ID));
    }

    #[tokio::test]
    async fn update_validation_and_missing_article() {
        let svc = test_service().await;
        let err = svc.update_article("bad", &article("A", "b")).await.unwrap_err();
        assert_eq!(validation_message(err), "unexpected article id");
        let err = svc
            .update_article("5a1f9c2e4b0d3a7f8e6c1b2d", &article("A", ""))
            .await
            .unwrap_err();
        assert_eq!(validation_message(err), "article content is required");
        let err = svc
            .update_article("5a1f9c2e4b0d3a7f8e6c1b2d", &article("A", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Article", .. }));
    }

    #[tokio::test]
    async fn patch_state_allows_only_draft_and_published() {
        let svc = test_service().await;
        let created = svc.create_article(&article("A", "b")).await.unwrap();
        let view = svc
            .patch_article_state(&created.id, Some(&json!("1")))
            .await
            .unwrap();
        assert_eq!(view.state, Some(ArticleState::Published));

        for bad in [json!(-1), json!("x"), json!(2)] {
            let err = svc.patch_article_state(&created.id, Some(&bad)).await.unwrap_err();
            assert_eq!(validation_message(err), "unknown article state");
        }
        let err = svc.patch_article_state(&created.id, None).await.unwrap_err();
        assert_eq!(validation_message(err), "unknown article state");

        let err = svc
            .patch_article_state("5a1f9c2e4b0d3a7f8e6c1b2d", Some(&json!(0)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn bulk_state_reaches_trash_and_skips_unknown_ids() {
        let svc = test_service().await;
        let a = svc.create_article(&published("A")).await.unwrap();
        let b = svc.create_article(&published("B")).await.unwrap();
        let (state, changed) = svc
            .bulk_update_state(
                &[a.id.clone(), b.id.clone(), "5a1f9c2e4b0d3a7f8e6c1b2d".into()],
                Some(&json!(-1)),
            )
            .await
            .unwrap();
        assert_eq!(state, ArticleState::Trashed);
        assert_eq!(changed, 2);
        assert_eq!(svc.get_article(&a.id).await.unwrap().state, ArticleState::Trashed);
    }

    #[tokio::test]
    async fn bulk_state_validation() {
        let svc = test_service().await;
        let err = svc.bulk_update_state(&[], Some(&json!(1))).await.unwrap_err();
        assert_eq!(validation_message(err), "no articles selected");
        let err = svc
            .bulk_update_state(&["5a1f9c2e4b0d3a7f8e6c1b2d".into()], Some(&json!("2")))
            .await
            .unwrap_err();
        assert_eq!(validation_message(err), "unknown article state");
        let err = svc
            .bulk_update_state(&["x".into()], Some(&json!(1)))
            .await
            .unwrap_err();
        assert_eq!(validation_message(err), "unexpected article id");
    }

    #[tokio::test]
    async fn uppercase_ids_are_rejected_not_silently_missed() {
        let svc = test_service().await;
        let created = svc.create_article(&published("A")).await.unwrap();
        let upper = created.id.to_uppercase();

        let err = svc.get_article_detail(&upper, false).await.unwrap_err();
        assert_eq!(validation_message(err), "unexpected article id");
        let err = svc.delete_articles(&[upper.clone()]).await.unwrap_err();
        assert_eq!(validation_message(err), "unexpected article id");
        let err = svc
            .bulk_update_state(&[created.id.clone(), upper], Some(&json!(0)))
            .await
            .unwrap_err();
        assert_eq!(validation_message(err), "unexpected article id");

        assert!(svc.article_exists(&created.id).await.unwrap());
        assert_eq!(svc.get_article(&created.id).await.unwrap().state, ArticleState::Published);
    }

    #[tokio::test]
    async fn delete_single_and_missing() {
        let svc = test_service().await;
        let created = svc.create_article(&article("A", "b")).await.unwrap();
        svc.delete_article(&created.id).await.unwrap();
        assert!(!svc.article_exists(&created.id).await.unwrap());
        svc.delete_article(&created.id).await.unwrap();
        let err = svc.delete_articles(&[]).await.unwrap_err();
        assert_eq!(validation_message(err), "no articles selected");
    }

    #[tokio::test]
    async fn delete_cascades_to_tag_links() {
        let svc = test_service().await;
        svc.create_tag(&term("rust")).await.unwrap();
        let created = svc
            .create_article(&ArticleInput {
                tag: Some(vec!["rust".into()]),
                ..article("A", "b")
            })
            .await
            .unwrap();
        svc.delete_article(&created.id).await.unwrap();
        let mut rows = svc
            .db()
            .conn()
            .query("SELECT count(*) FROM article_tags", ())
            .await
            .unwrap();
        let n: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn public_detail_counts_visits_and_hides_drafts() {
        let svc = test_service().await;
        let live = svc.create_article(&published("A")).await.unwrap();
        let draft = svc.create_article(&article("B", "b")).await.unwrap();

        let first = svc.get_article_detail(&live.id, false).await.unwrap();
        assert_eq!(first.article.meta.unwrap().visits, 1);
        assert!(first.article.content.is_none());
        assert!(first.article.rendered_content.is_some());
        svc.get_article_detail(&live.id, false).await.unwrap();

        let editor = svc.get_article_detail(&live.id, true).await.unwrap();
        assert_eq!(editor.article.meta.unwrap().visits, 2);
        assert_eq!(editor.article.content.as_deref(), Some("body"));

        let err = svc.get_article_detail(&draft.id, false).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
        assert!(svc.get_article_detail(&draft.id, true).await.is_ok());
        assert_eq!(svc.get_article(&draft.id).await.unwrap().meta.visits, 0);
    }

    #[tokio::test]
    async fn like_only_published() {
        let svc = test_service().await;
        let live = svc.create_article(&published("A")).await.unwrap();
        let draft = svc.create_article(&article("B", "b")).await.unwrap();
        svc.like_article(&live.id).await.unwrap();
        let meta = svc.like_article(&live.id).await.unwrap();
        assert_eq!(meta.likes, 2);
        assert!(matches!(
            svc.like_article(&draft.id).await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn list_paginates_newest_first() {
        let svc = test_service().await;
        for title in ["one", "two", "three"] {
            svc.create_article(&published(title)).await.unwrap();
        }
        let params = ListParams {
            page_size: Some(json!(2)),
            ..ListParams::default()
        };
        let page = svc.list_articles(&params, false).await.unwrap();
        let titles: Vec<_> = page.list.iter().filter_map(|a| a.title.clone()).collect();
        assert_eq!(titles, vec!["three", "two"]);
        assert_eq!(page.pagination.total_count, 3);
        assert_eq!(page.pagination.total_page, 2);

        let params = ListParams {
            page: Some(json!("2")),
            page_size: Some(json!(2)),
            ..ListParams::default()
        };
        let page = svc.list_articles(&params, false).await.unwrap();
        let titles: Vec<_> = page.list.iter().filter_map(|a| a.title.clone()).collect();
        assert_eq!(titles, vec!["one"]);
    }

    #[tokio::test]
    async fn list_keyword_is_case_sensitive_literal() {
        let svc = test_service().await;
        svc.create_article(&published("Rust tips")).await.unwrap();
        svc.create_article(&ArticleInput {
            description: Some("all about rust".into()),
            ..published("Other")
        })
        .await
        .unwrap();
        svc.create_article(&published("a.b")).await.unwrap();

        let count = |keyword: &str| {
            let params = ListParams {
                keyword: Some(keyword.to_string()),
                ..ListParams::default()
            };
            let svc = &svc;
            async move { svc.list_articles(&params, true).await.unwrap().list.len() }
        };
        assert_eq!(count("Rust").await, 1);
        assert_eq!(count("rust").await, 1);
        assert_eq!(count("ust").await, 2);
        assert_eq!(count(".").await, 1);
    }

    #[tokio::test]
    async fn list_hot_orders_by_popularity() {
        let svc = test_service().await;
        let quiet = svc.create_article(&published("quiet")).await.unwrap();
        let loved = svc.create_article(&published("loved")).await.unwrap();
        svc.like_article(&loved.id).await.unwrap();
        svc.get_article_detail(&quiet.id, false).await.unwrap();

        let params = ListParams {
            hot: Some(json!("1")),
            sort: Some(json!({ "title": 1 })),
            ..ListParams::default()
        };
        let page = svc.list_articles(&params, false).await.unwrap();
        let first = &page.list[0];
        assert_eq!(first.id, loved.id);
        assert!(first.description.is_none());
        assert!(first.keywords.is_none());
        assert!(first.meta.is_some());
    }

    #[tokio::test]
    async fn list_filters_by_tag_name() {
        let svc = test_service().await;
        svc.create_tag(&term("rust")).await.unwrap();
        svc.create_article(&ArticleInput {
            tag: Some(vec!["rust".into()]),
            ..published("tagged")
        })
        .await
        .unwrap();
        svc.create_article(&published("plain")).await.unwrap();

        let params = ListParams {
            tag: Some("rust".into()),
            ..ListParams::default()
        };
        let page = svc.list_articles(&params, false).await.unwrap();
        assert_eq!(page.list.len(), 1);
        assert_eq!(page.list[0].title.as_deref(), Some("tagged"));
    }
}
