use anyhow::Context;
use blog_api::{Method, Request};
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RequestArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `blogctl request`.
pub async fn handle(args: &RequestArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = build_request(args)?;
    let envelope = ctx.api.handle(&request).await;
    output(&envelope, flags.format)
}

fn build_request(args: &RequestArgs) -> anyhow::Result<Request> {
    let method: Method = args.method.parse()?;
    let body = match args.body.as_deref() {
        Some(raw) => serde_json::from_str(raw).context("--body must be valid JSON")?,
        None => Value::Null,
    };
    Ok(Request::new(method, args.path.clone())
        .with_query_pairs(&args.query)?
        .body(body)
        .authorized(args.authorized))
}
