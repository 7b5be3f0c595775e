//! Category and tag handlers.

use blog_db::error::ServiceError;
use blog_db::inputs::{TermInput, from_body};
use blog_db::service::BlogService;

use super::Reply;
use crate::request::Request;

pub async fn list_categories(
    service: &BlogService,
    request: &Request,
) -> Result<Reply, ServiceError> {
    let list = service.list_categories(request.authorized).await?;
    Reply::new("Category list fetched", &list)
}

pub async fn create_category(
    service: &BlogService,
    request: &Request,
) -> Result<Reply, ServiceError> {
    let input: TermInput = from_body(&request.body)?;
    let category = service.create_category(&input).await?;
    Reply::new("Category created", &category)
}

pub async fn get_category(service: &BlogService, id: &str) -> Result<Reply, ServiceError> {
    let category = service.get_category(id).await?;
    Reply::new("Category fetched", &category)
}

pub async fn delete_category(service: &BlogService, id: &str) -> Result<Reply, ServiceError> {
    service.delete_category(id).await?;
    Ok(Reply::empty("Category deleted"))
}

pub async fn list_tags(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let list = service.list_tags(request.authorized).await?;
    Reply::new("Tag list fetched", &list)
}

pub async fn create_tag(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let input: TermInput = from_body(&request.body)?;
    let tag = service.create_tag(&input).await?;
    Reply::new("Tag created", &tag)
}

pub async fn get_tag(service: &BlogService, id: &str) -> Result<Reply, ServiceError> {
    let tag = service.get_tag(id).await?;
    Reply::new("Tag fetched", &tag)
}

pub async fn delete_tag(service: &BlogService, id: &str) -> Result<Reply, ServiceError> {
    service.delete_tag(id).await?;
    Ok(Reply::empty("Tag deleted"))
}
