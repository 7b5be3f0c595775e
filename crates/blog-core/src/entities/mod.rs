//! Entity structs for all blog domain objects.
//!
//! Each entity maps to a table in the libSQL database. Wire names are
//! `camelCase` to match the HTTP contract (`renderedContent`, `pageId`, ...).

mod article;
mod comment;
mod term;

pub use article::{
    Article, ArticleDetail, ArticleMeta, ArticleView, Extend, RelatedArticle, Sibling,
    SiblingArticle, Thumb,
};
pub use comment::{Comment, CommentAuthor};
pub use term::{Category, Tag};
