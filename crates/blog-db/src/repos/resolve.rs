//! Reference resolver: category/tag input to canonical id.
//!
//! An identifier-shaped input is used as-is; existence is not checked here.
//! A name is looked up by its unique name. A miss, or a failed lookup, yields
//! the sentinel id so that a filter built on it matches nothing.

use blog_core::ids::{NOT_FOUND_ID, is_identifier, is_sentinel};

use super::term::TermKind;
use crate::service::BlogService;

impl BlogService {
    /// Resolve a category id or name.
    pub async fn resolve_category(&self, input: &str) -> String {
        self.resolve_term(TermKind::Category, input).await
    }

    /// Resolve a tag id or name.
    pub async fn resolve_tag(&self, input: &str) -> String {
        self.resolve_term(TermKind::Tag, input).await
    }

    /// Resolve each entry, dropping unresolvable ones and duplicates.
    /// Order of first appearance is kept.
    pub async fn resolve_tag_list(&self, inputs: &[String]) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(inputs.len());
        for input in inputs {
            let id = self.resolve_tag(input).await;
            if !is_sentinel(&id) && !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    async fn resolve_term(&self, kind: TermKind, input: &str) -> String {
        if is_identifier(input) {
            return input.to_string();
        }
        match self.find_term_by_name(kind, input).await {
            Ok(Some(term)) => term.id,
            Ok(None) => {
                tracing::debug!(kind = kind.entity(), name = input, "reference did not resolve");
                NOT_FOUND_ID.to_string()
            }
            Err(error) => {
                tracing::error!(kind = kind.entity(), name = input, %error, "reference lookup failed");
                NOT_FOUND_ID.to_string()
            }
        }
    }
}
