//! Site-wide reads: archives and statistics.

use blog_db::error::ServiceError;
use blog_db::inputs::{PageParams, from_body};
use blog_db::service::BlogService;
use serde_json::json;

use super::Reply;
use crate::request::Request;

pub async fn archives(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let params: PageParams = from_body(&request.query_object())?;
    let page = service.archives(&params, request.authorized).await?;
    Reply::new("Archives fetched", &page)
}

pub async fn statistics(service: &BlogService, request: &Request) -> Result<Reply, ServiceError> {
    let count = service.statistics(request.authorized).await?;
    Reply::new("Statistics fetched", &json!({ "count": count }))
}
