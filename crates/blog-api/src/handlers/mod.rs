//! Operation handlers. Each decodes its inputs from the request, calls the
//! service and names its success.

mod article;
mod comment;
mod site;
mod term;

use serde::Serialize;
use serde_json::Value;

use blog_db::error::{DatabaseError, ServiceError};
use blog_db::service::BlogService;

use crate::dispatch::Operation;
use crate::request::Request;

/// A successful outcome before normalization.
#[derive(Debug)]
pub struct Reply {
    pub message: String,
    pub data: Value,
}

impl Reply {
    fn new<T: Serialize>(message: impl Into<String>, data: &T) -> Result<Self, ServiceError> {
        let data =
            serde_json::to_value(data).map_err(|e| ServiceError::Storage(DatabaseError::Other(e.into())))?;
        Ok(Self {
            message: message.into(),
            data,
        })
    }

    fn empty(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: Value::Null,
        }
    }
}

pub async fn execute(
    service: &BlogService,
    operation: &Operation,
    request: &Request,
) -> Result<Reply, ServiceError> {
    match operation {
        Operation::ListArticles => article::list(service, request).await,
        Operation::CreateArticle => article::create(service, request).await,
        Operation::BulkUpdateState => article::bulk_state(service, request).await,
        Operation::BulkDeleteArticles => article::bulk_delete(service, request).await,
        Operation::GetArticle(id) => article::detail(service, id, request).await,
        Operation::UpdateArticle(id) => article::update(service, id, request).await,
        Operation::PatchArticleState(id) => article::patch_state(service, id, request).await,
        Operation::DeleteArticle(id) => article::delete(service, id).await,
        Operation::LikeArticle(id) => article::like(service, id).await,
        Operation::Archives => site::archives(service, request).await,
        Operation::Statistics => site::statistics(service, request).await,
        Operation::ListCategories => term::list_categories(service, request).await,
        Operation::CreateCategory => term::create_category(service, request).await,
        Operation::GetCategory(id) => term::get_category(service, id).await,
        Operation::DeleteCategory(id) => term::delete_category(service, id).await,
        Operation::ListTags => term::list_tags(service, request).await,
        Operation::CreateTag => term::create_tag(service, request).await,
        Operation::GetTag(id) => term::get_tag(service, id).await,
        Operation::DeleteTag(id) => term::delete_tag(service, id).await,
        Operation::ListComments => comment::list(service, request).await,
        Operation::CreateComment => comment::create(service, request).await,
    }
}
