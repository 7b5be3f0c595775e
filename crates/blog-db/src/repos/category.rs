//! Category repository: create, list with article counts, get, delete.

use blog_core::entities::Category;
use blog_core::responses::Counted;

use super::term::TermKind;
use crate::error::ServiceError;
use crate::inputs::TermInput;
use crate::service::BlogService;

impl BlogService {
    /// Create a category. Names are unique.
    ///
    /// # Errors
    ///
    /// `Validation` when the name is missing or taken.
    pub async fn create_category(&self, input: &TermInput) -> Result<Category, ServiceError> {
        let category = self.create_term(TermKind::Category, input).await?.into_category();
        tracing::debug!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// All categories with the number of articles filed under each.
    ///
    /// Unauthorized callers only count published articles.
    pub async fn list_categories(
        &self,
        authorized: bool,
    ) -> Result<Vec<Counted<Category>>, ServiceError> {
        Ok(self
            .list_terms(TermKind::Category, !authorized)
            .await?
            .into_iter()
            .map(|(record, count)| Counted {
                item: record.into_category(),
                count,
            })
            .collect())
    }

    pub async fn get_category(&self, id: &str) -> Result<Category, ServiceError> {
        Ok(self.get_term(TermKind::Category, id).await?.into_category())
    }

    /// Delete a category. Articles filed under it keep the dangling id.
    pub async fn delete_category(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_term(TermKind::Category, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ServiceError;
    use crate::test_support::{article, published, term, test_service};

    #[tokio::test]
    async fn create_and_get() {
        let svc = test_service().await;
        let created = svc.create_category(&term("rust")).await.unwrap();
        let fetched = svc.get_category(&created.id).await.unwrap();
        assert_eq!(fetched.name, "rust");
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let svc = test_service().await;
        svc.create_category(&term("rust")).await.unwrap();
        let err = svc.create_category(&term("rust")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m.contains("already exists")));
    }

    #[tokio::test]
    async fn missing_name_is_rejected() {
        let svc = test_service().await;
        let err = svc.create_category(&term("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "category name is required"));
    }

    #[tokio::test]
    async fn list_counts_articles_by_visibility() {
        let svc = test_service().await;
        let cat = svc.create_category(&term("rust")).await.unwrap();
        let mut draft = article("draft", "body");
        draft.category = Some(cat.id.clone());
        svc.create_article(&draft).await.unwrap();
        let mut live = published("live");
        live.category = Some("rust".into());
        svc.create_article(&live).await.unwrap();

        let all = svc.list_categories(true).await.unwrap();
        assert_eq!(all[0].count, 2);
        let public = svc.list_categories(false).await.unwrap();
        assert_eq!(public[0].count, 1);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let svc = test_service().await;
        let cat = svc.create_category(&term("rust")).await.unwrap();
        svc.delete_category(&cat.id).await.unwrap();
        assert!(matches!(
            svc.get_category(&cat.id).await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
        assert!(matches!(
            svc.delete_category(&cat.id).await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let svc = test_service().await;
        let err = svc.get_category("nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "unexpected category id"));
    }
}
