//! Path routing.
//!
//! Paths are matched segment by segment after trimming surrounding slashes
//! and any query suffix. Identifier segments are captured verbatim; their
//! shape is checked by the operation, not the router.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Articles,
    Article(String),
    ArticleLike(String),
    Archives,
    Statistics,
    Categories,
    Category(String),
    Tags,
    Tag(String),
    Comments,
}

impl Route {
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split('?').next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["articles"] => Some(Self::Articles),
            ["articles", id] => Some(Self::Article((*id).to_string())),
            ["articles", id, "like"] => Some(Self::ArticleLike((*id).to_string())),
            ["archives"] => Some(Self::Archives),
            ["statistics"] => Some(Self::Statistics),
            ["categories"] => Some(Self::Categories),
            ["categories", id] => Some(Self::Category((*id).to_string())),
            ["tags"] => Some(Self::Tags),
            ["tags", id] => Some(Self::Tag((*id).to_string())),
            ["comments"] => Some(Self::Comments),
            _ => None,
        }
    }
}
