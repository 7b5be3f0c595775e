use blog_db::error::ServiceError;
use blog_db::inputs::{CommentInput, from_body};
use blog_db::service::BlogService;

use super::Reply;
use crate::request::Request;

pub async fn list(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let page_id = request.query.get("pageId").map_or("", String::as_str);
    let comments = service.list_comments(page_id).await?;
    Reply::new("Comment list fetched", &comments)
}

pub async fn create(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let input: CommentInput = from_body(&request.body)?;
    let comment = service.create_comment(&input).await?;
    Reply::new("Comment created", &comment)
}
