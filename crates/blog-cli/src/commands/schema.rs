use anyhow::bail;
use blog_core::entities::{Article, ArticleDetail, ArticleView, Category, Comment, Tag};
use blog_core::enums::ArticleState;
use blog_core::responses::{ArchiveYear, Envelope, Pagination, Statistics};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `blogctl schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(&args.type_name)?, flags.format)
}

fn schema(type_name: &str) -> anyhow::Result<Schema> {
    let schema = match type_name {
        "envelope" => schema_for!(Envelope),
        "article" => schema_for!(Article),
        "article-view" => schema_for!(ArticleView),
        "article-detail" => schema_for!(ArticleDetail),
        "article-state" => schema_for!(ArticleState),
        "category" => schema_for!(Category),
        "tag" => schema_for!(Tag),
        "comment" => schema_for!(Comment),
        "pagination" => schema_for!(Pagination),
        "archive-year" => schema_for!(ArchiveYear),
        "statistics" => schema_for!(Statistics),
        other => bail!("unknown schema type '{other}'"),
    };
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_have_schemas() {
        for name in ["envelope", "article", "article-detail", "statistics"] {
            let schema = schema(name).unwrap();
            let value = serde_json::to_value(&schema).unwrap();
            assert!(value.get("properties").is_some(), "{name}");
        }
        let state = serde_json::to_value(schema("article-state").unwrap()).unwrap();
        assert_eq!(state["type"], "integer");
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(schema("user").is_err());
    }
}
