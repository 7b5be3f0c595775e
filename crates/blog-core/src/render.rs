//! Markdown to HTML rendering for the cached `renderedContent` field.
//!
//! Rendering is pure and deterministic. It runs on every create and on every
//! content-bearing update; reads always serve the cached HTML.

use pulldown_cmark::{Options, Parser, html};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Render raw article markup to HTML. Empty input renders to an empty string.
#[must_use]
pub fn render(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    let parser = Parser::new_ext(markup, options());
    let mut out = String::with_capacity(markup.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_renders_to_h1() {
        assert_eq!(render("# Hi"), "<h1>Hi</h1>\n");
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn non_empty_input_renders_non_empty() {
        assert!(!render("plain words").is_empty());
        assert!(render("plain words").contains("<p>plain words</p>"));
    }

    #[test]
    fn tables_and_strikethrough_are_enabled() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let src = "## Title\n\n- one\n- two\n\n```rust\nfn main() {}\n```";
        assert_eq!(render(src), render(src));
    }
}
