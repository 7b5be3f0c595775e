//! Explicit population of article references.
//!
//! Articles hold category and tag ids. A read loads a page of articles first,
//! then fetches categories by id set and tags by id set in one query each.
//! References with no row (dangling ids, the sentinel) populate to nothing.

use std::collections::{HashMap, HashSet};

use blog_core::entities::{Article, ArticleView, Category, Tag};

use super::term::TermKind;
use crate::error::DatabaseError;
use crate::helpers::{placeholders, text_values};
use crate::query::Projection;
use crate::service::BlogService;

impl BlogService {
    /// Categories keyed by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lookup fails.
    pub async fn categories_by_ids(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Category>, DatabaseError> {
        Ok(self
            .terms_by_ids(TermKind::Category, ids)
            .await?
            .into_iter()
            .map(|(id, record)| (id, record.into_category()))
            .collect())
    }

    /// Tags keyed by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lookup fails.
    pub async fn tags_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Tag>, DatabaseError> {
        Ok(self
            .terms_by_ids(TermKind::Tag, ids)
            .await?
            .into_iter()
            .map(|(id, record)| (id, record.into_tag()))
            .collect())
    }

    /// Ordered tag ids of each article in `article_ids`.
    pub(crate) async fn tag_ids_for(
        &self,
        article_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, DatabaseError> {
        let mut by_article: HashMap<String, Vec<String>> = HashMap::new();
        if article_ids.is_empty() {
            return Ok(by_article);
        }
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT article_id, tag_id FROM article_tags
                     WHERE article_id IN ({}) ORDER BY article_id, position",
                    placeholders(1, article_ids.len())
                ),
                libsql::params_from_iter(text_values(article_ids)),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            by_article
                .entry(row.get::<String>(0)?)
                .or_default()
                .push(row.get::<String>(1)?);
        }
        Ok(by_article)
    }

    /// Fill each article's tag ids in place.
    pub(crate) async fn attach_tag_ids(&self, articles: &mut [Article]) -> Result<(), DatabaseError> {
        let ids: Vec<String> = articles.iter().map(|a| a.id.clone()).collect();
        let mut tag_ids = self.tag_ids_for(&ids).await?;
        for article in articles {
            article.tag = tag_ids.remove(&article.id).unwrap_or_default();
        }
        Ok(())
    }

    /// Project articles and replace their reference ids with the entities.
    pub(crate) async fn populate(
        &self,
        articles: Vec<Article>,
        projection: Projection,
    ) -> Result<Vec<ArticleView>, DatabaseError> {
        let category_ids: Vec<String> = articles
            .iter()
            .filter_map(|a| a.category.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let tag_ids: Vec<String> = articles
            .iter()
            .flat_map(|a| a.tag.iter().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let categories = self.categories_by_ids(&category_ids).await?;
        let tags = self.tags_by_ids(&tag_ids).await?;

        Ok(articles
            .into_iter()
            .map(|article| {
                let category = article
                    .category
                    .as_ref()
                    .and_then(|id| categories.get(id))
                    .cloned();
                let article_tags = article
                    .tag
                    .iter()
                    .filter_map(|id| tags.get(id))
                    .cloned()
                    .collect();
                projection.view(article, category, article_tags)
            })
            .collect())
    }
}
