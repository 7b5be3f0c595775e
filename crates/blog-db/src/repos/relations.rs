//! Related articles (shared tags) and sibling navigation (creation order).
//!
//! Both are best-effort: a storage failure is logged and degrades to an
//! empty list or a missing sibling instead of failing the read.

use blog_core::entities::{Article, ArticleMeta, RelatedArticle, Sibling, SiblingArticle, Thumb};

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_counter, get_opt_string, parse_datetime, parse_json_column, placeholders,
    text_values,
};
use crate::service::BlogService;

fn row_to_related(row: &libsql::Row) -> Result<RelatedArticle, DatabaseError> {
    Ok(RelatedArticle {
        id: row.get(0)?,
        title: row.get(1)?,
        thumb: parse_json_column::<Option<Thumb>>(get_opt_string(row, 2)?.as_deref())?,
        meta: ArticleMeta {
            visits: get_counter(row, 3)?,
            likes: get_counter(row, 4)?,
            comments: get_counter(row, 5)?,
        },
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn row_to_sibling(row: &libsql::Row) -> Result<SiblingArticle, DatabaseError> {
    Ok(SiblingArticle {
        id: row.get(0)?,
        title: row.get(1)?,
        thumb: parse_json_column::<Option<Thumb>>(get_opt_string(row, 2)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Prev,
    Next,
}

impl BlogService {
    /// Other published articles sharing at least one tag with `article`,
    /// newest first. Empty when the article has no tags.
    pub async fn related_articles(&self, article: &Article) -> Vec<RelatedArticle> {
        if article.tag.is_empty() {
            return Vec::new();
        }
        match self.query_related(article).await {
            Ok(related) => related,
            Err(error) => {
                tracing::error!(id = %article.id, %error, "related articles lookup failed");
                Vec::new()
            }
        }
    }

    /// Closest earlier and later articles by creation time.
    ///
    /// Unauthorized callers only navigate between published articles.
    pub async fn sibling_articles(&self, article: &Article, authorized: bool) -> Sibling {
        Sibling {
            prev: self.sibling(article, authorized, Side::Prev).await,
            next: self.sibling(article, authorized, Side::Next).await,
        }
    }

    async fn query_related(&self, article: &Article) -> Result<Vec<RelatedArticle>, DatabaseError> {
        let mut params = vec![libsql::Value::Text(article.id.clone())];
        params.extend(text_values(&article.tag));
        let sql = format!(
            "SELECT id, title, thumb, visits, likes, comments, created_at FROM articles a
             WHERE a.id != ?1 AND a.state = 1 AND EXISTS (
                 SELECT 1 FROM article_tags t WHERE t.article_id = a.id AND t.tag_id IN ({})
             )
             ORDER BY a.created_at DESC, a.rowid DESC",
            placeholders(2, article.tag.len())
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut related = Vec::new();
        while let Some(row) = rows.next().await? {
            related.push(row_to_related(&row)?);
        }
        Ok(related)
    }

    async fn sibling(&self, article: &Article, authorized: bool, side: Side) -> Option<SiblingArticle> {
        match self.query_sibling(article, authorized, side).await {
            Ok(sibling) => sibling,
            Err(error) => {
                tracing::error!(id = %article.id, ?side, %error, "sibling lookup failed");
                None
            }
        }
    }

    async fn query_sibling(
        &self,
        article: &Article,
        authorized: bool,
        side: Side,
    ) -> Result<Option<SiblingArticle>, DatabaseError> {
        let (cmp, order) = match side {
            Side::Prev => ("<", "DESC"),
            Side::Next => (">", "ASC"),
        };
        let state = if authorized { "" } else { " AND state = 1" };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT id, title, thumb, created_at FROM articles
                     WHERE created_at {cmp} ?1{state}
                     ORDER BY created_at {order}, rowid {order} LIMIT 1"
                ),
                [format_datetime(&article.created_at)],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_sibling(&row)?)),
            None => Ok(None),
        }
    }
}
