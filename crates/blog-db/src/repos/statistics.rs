//! Entity totals.

use blog_core::responses::Statistics;

use crate::error::{DatabaseError, ServiceError};
use crate::helpers::get_counter;
use crate::service::BlogService;

impl BlogService {
    /// Count articles, categories and tags. Unauthorized callers only count
    /// published articles.
    ///
    /// # Errors
    ///
    /// `Storage` on query failure.
    pub async fn statistics(&self, authorized: bool) -> Result<Statistics, ServiceError> {
        let article_sql = if authorized {
            "SELECT count(*) FROM articles"
        } else {
            "SELECT count(*) FROM articles WHERE state = 1"
        };
        Ok(Statistics {
            article: self.count(article_sql).await?,
            category: self.count("SELECT count(*) FROM categories").await?,
            tag: self.count("SELECT count(*) FROM tags").await?,
        })
    }

    async fn count(&self, sql: &str) -> Result<u64, DatabaseError> {
        let mut rows = self.db().conn().query(sql, ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_counter(&row, 0)
    }
}
