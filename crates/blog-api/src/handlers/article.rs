use blog_core::enums::ArticleState;
use blog_db::error::ServiceError;
use blog_db::inputs::{ArticleInput, BulkInput, ListParams, StateInput, from_body};
use blog_db::service::BlogService;

use super::Reply;
use crate::request::Request;

pub async fn list(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let params: ListParams = from_body(&request.query_object())?;
    let page = service.list_articles(&params, request.authorized).await?;
    Reply::new("Article list fetched", &page)
}

pub async fn create(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let input: ArticleInput = from_body(&request.body)?;
    let view = service.create_article(&input).await?;
    let message = if view.state == Some(ArticleState::Published) {
        "Article created"
    } else {
        "Draft created"
    };
    Reply::new(message, &view)
}

pub async fn bulk_state(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let input: BulkInput = from_body(&request.body)?;
    let (state, changed) = service
        .bulk_update_state(&input.article_ids, input.state.as_ref())
        .await?;
    let action = match state {
        ArticleState::Published => "Published",
        ArticleState::Draft => "Moved to drafts",
        ArticleState::Trashed => "Moved to trash",
    };
    Reply::new(action, &serde_json::json!({ "changed": changed }))
}

pub async fn bulk_delete(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let input: BulkInput = from_body(&request.body)?;
    let deleted = service.delete_articles(&input.article_ids).await?;
    let message = if input.article_ids.len() == 1 {
        "Article deleted"
    } else {
        "Articles deleted"
    };
    Reply::new(message, &serde_json::json!({ "deleted": deleted }))
}

pub async fn detail(
    service: &BlogService,
    id: &str,
    request: &Request,
) -> Result<Reply, ServiceError> {
    let detail = service.get_article_detail(id, request.authorized).await?;
    Reply::new("Article detail fetched", &detail)
}

pub async fn update(
    service: &BlogService,
    id: &str,
    request: &Request,
) -> Result<Reply, ServiceError> {
    let input: ArticleInput = from_body(&request.body)?;
    let view = service.update_article(id, &input).await?;
    Reply::new("Article updated", &view)
}

pub async fn patch_state(
    service: &BlogService,
    id: &str,
    request: &Request,
) -> Result<Reply, ServiceError> {
    let input: StateInput = from_body(&request.body)?;
    let view = service.patch_article_state(id, input.state.as_ref()).await?;
    Reply::new("Article state updated", &view)
}

pub async fn delete(service: &BlogService, id: &str) -> Result<Reply, ServiceError> {
    service.delete_article(id).await?;
    Ok(Reply::empty("Article deleted"))
}

pub async fn like(service: &BlogService, id: &str) -> Result<Reply, ServiceError> {
    let meta = service.like_article(id).await?;
    Reply::new("Article liked", &meta)
}
