//! Tag repository.

use blog_core::entities::Tag;
use blog_core::responses::Counted;

use super::term::TermKind;
use crate::error::ServiceError;
use crate::inputs::TermInput;
use crate::service::BlogService;

impl BlogService {
    /// Create a tag. Names are unique.
    ///
    /// # Errors
    ///
    /// `Validation` when the name is missing or taken.
    pub async fn create_tag(&self, input: &TermInput) -> Result<Tag, ServiceError> {
        let tag = self.create_term(TermKind::Tag, input).await?.into_tag();
        tracing::debug!(id = %tag.id, name = %tag.name, "tag created");
        Ok(tag)
    }

    /// All tags with the number of articles carrying each.
    pub async fn list_tags(&self, authorized: bool) -> Result<Vec<Counted<Tag>>, ServiceError> {
        Ok(self
            .list_terms(TermKind::Tag, !authorized)
            .await?
            .into_iter()
            .map(|(record, count)| Counted {
                item: record.into_tag(),
                count,
            })
            .collect())
    }

    pub async fn get_tag(&self, id: &str) -> Result<Tag, ServiceError> {
        Ok(self.get_term(TermKind::Tag, id).await?.into_tag())
    }

    pub async fn delete_tag(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_term(TermKind::Tag, id).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::{published, term, test_service};

    #[tokio::test]
    async fn list_is_in_creation_order_with_counts() {
        let svc = test_service().await;
        let rust = svc.create_tag(&term("rust")).await.unwrap();
        svc.create_tag(&term("sql")).await.unwrap();

        let mut input = published("a");
        input.tag = Some(vec![rust.id.clone()]);
        svc.create_article(&input).await.unwrap();

        let tags = svc.list_tags(false).await.unwrap();
        let names: Vec<(&str, u64)> = tags.iter().map(|t| (t.item.name.as_str(), t.count)).collect();
        assert_eq!(names, vec![("rust", 1), ("sql", 0)]);
    }

    #[tokio::test]
    async fn deleted_tag_populates_to_nothing() {
        let svc = test_service().await;
        let rust = svc.create_tag(&term("rust")).await.unwrap();
        let mut input = published("a");
        input.tag = Some(vec!["rust".into()]);
        let created = svc.create_article(&input).await.unwrap();
        assert_eq!(created.tag.as_ref().map(Vec::len), Some(1));

        svc.delete_tag(&rust.id).await.unwrap();
        let detail = svc.get_article_detail(&created.id, true).await.unwrap();
        assert_eq!(detail.article.tag, Some(vec![]));
    }
}
