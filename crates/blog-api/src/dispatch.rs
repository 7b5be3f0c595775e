//! The (route, method) dispatch table.
//!
//! Every supported pair maps to exactly one [`Operation`]; anything else is
//! unsupported and answered with a uniform failure by the caller.

use crate::method::Method;
use crate::route::Route;

/// A supported operation, carrying the path identifier where it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListArticles,
    CreateArticle,
    BulkUpdateState,
    BulkDeleteArticles,
    GetArticle(String),
    UpdateArticle(String),
    PatchArticleState(String),
    DeleteArticle(String),
    LikeArticle(String),
    Archives,
    Statistics,
    ListCategories,
    CreateCategory,
    GetCategory(String),
    DeleteCategory(String),
    ListTags,
    CreateTag,
    GetTag(String),
    DeleteTag(String),
    ListComments,
    CreateComment,
}

impl Operation {
    /// Look up the operation for a route and method.
    #[must_use]
    pub fn resolve(route: Route, method: Method) -> Option<Self> {
        use Method::{Delete, Get, Patch, Post, Put};

        let op = match (route, method) {
            (Route::Articles, Get) => Self::ListArticles,
            (Route::Articles, Post) => Self::CreateArticle,
            (Route::Articles, Patch) => Self::BulkUpdateState,
            (Route::Articles, Delete) => Self::BulkDeleteArticles,
            (Route::Article(id), Get) => Self::GetArticle(id),
            (Route::Article(id), Put) => Self::UpdateArticle(id),
            (Route::Article(id), Patch) => Self::PatchArticleState(id),
            (Route::Article(id), Delete) => Self::DeleteArticle(id),
            (Route::ArticleLike(id), Post) => Self::LikeArticle(id),
            (Route::Archives, Get) => Self::Archives,
            (Route::Statistics, Get) => Self::Statistics,
            (Route::Categories, Get) => Self::ListCategories,
            (Route::Categories, Post) => Self::CreateCategory,
            (Route::Category(id), Get) => Self::GetCategory(id),
            (Route::Category(id), Delete) => Self::DeleteCategory(id),
            (Route::Tags, Get) => Self::ListTags,
            (Route::Tags, Post) => Self::CreateTag,
            (Route::Tag(id), Get) => Self::GetTag(id),
            (Route::Tag(id), Delete) => Self::DeleteTag(id),
            (Route::Comments, Get) => Self::ListComments,
            (Route::Comments, Post) => Self::CreateComment,
            _ => return None,
        };
        Some(op)
    }

    /// Whether the caller must be authorized. Reads, comments and likes
    /// are public.
    #[must_use]
    pub const fn requires_authorization(&self) -> bool {
        matches!(
            self,
            Self::CreateArticle
                | Self::BulkUpdateState
                | Self::BulkDeleteArticles
                | Self::UpdateArticle(_)
                | Self::PatchArticleState(_)
                | Self::DeleteArticle(_)
                | Self::CreateCategory
                | Self::DeleteCategory(_)
                | Self::CreateTag
                | Self::DeleteTag(_)
        )
    }

    /// Message of a failed run, used for storage failures.
    #[must_use]
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::ListArticles => "Failed to fetch article list",
            Self::CreateArticle => "Failed to create article",
            Self::BulkUpdateState => "Failed to change article state",
            Self::BulkDeleteArticles => "Failed to delete articles",
            Self::GetArticle(_) => "Failed to fetch article detail",
            Self::UpdateArticle(_) => "Failed to update article",
            Self::PatchArticleState(_) => "Failed to update article state",
            Self::DeleteArticle(_) => "Failed to delete article",
            Self::LikeArticle(_) => "Failed to like article",
            Self::Archives => "Failed to fetch archives",
            Self::Statistics => "Failed to fetch statistics",
            Self::ListCategories => "Failed to fetch category list",
            Self::CreateCategory => "Failed to create category",
            Self::GetCategory(_) => "Failed to fetch category",
            Self::DeleteCategory(_) => "Failed to delete category",
            Self::ListTags => "Failed to fetch tag list",
            Self::CreateTag => "Failed to create tag",
            Self::GetTag(_) => "Failed to fetch tag",
            Self::DeleteTag(_) => "Failed to delete tag",
            Self::ListComments => "Failed to fetch comment list",
            Self::CreateComment => "Failed to create comment",
        }
    }
}
