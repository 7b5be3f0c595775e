//! List-query builder.
//!
//! Turns [`ListParams`] plus the caller's authorization into a
//! [`ListQuery`]: a filter, an ordered sort, a page window and a projection.
//! Parsing is pure; only category/tag name resolution touches storage and
//! happens in [`BlogService::build_list_query`].
//!
//! Visibility always wins: an unauthorized caller is pinned to published
//! articles whatever `state` it asked for, and never sees raw content,
//! rendered content or state in a list.

use blog_config::BlogSettings;
use blog_core::entities::{Article, ArticleView, Category, Tag};
use blog_core::enums::ArticleState;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ServiceError;
use crate::helpers::{format_datetime, parse_user_date};
use crate::inputs::ListParams;
use crate::service::BlogService;

/// Sortable article attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Likes,
    Comments,
    Visits,
    Title,
}

impl SortField {
    /// Map a sort key to its field. Each field has several accepted
    /// spellings: `createAt`/`createdAt`, `updateAt`/`updatedAt`,
    /// `meta.ups`/`meta.likes`/`likes`, `meta.comments`/`comments`,
    /// `meta.pvs`/`meta.visits`/`visits`, and `title`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "createAt" | "createdAt" => Some(Self::CreatedAt),
            "updateAt" | "updatedAt" => Some(Self::UpdatedAt),
            "meta.ups" | "meta.likes" | "likes" => Some(Self::Likes),
            "meta.comments" | "comments" => Some(Self::Comments),
            "meta.pvs" | "meta.visits" | "visits" => Some(Self::Visits),
            "title" => Some(Self::Title),
            _ => None,
        }
    }

    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "a.created_at",
            Self::UpdatedAt => "a.updated_at",
            Self::Likes => "a.likes",
            Self::Comments => "a.comments",
            Self::Visits => "a.visits",
            Self::Title => "a.title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// `1`/`-1` as numbers or strings, or `asc`/`desc` spelled out.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_i64()? {
                1 => Some(Self::Asc),
                -1 => Some(Self::Desc),
                _ => None,
            },
            Value::String(s) => match s.as_str() {
                "1" | "asc" | "ascending" => Some(Self::Asc),
                "-1" | "desc" | "descending" => Some(Self::Desc),
                _ => None,
            },
            _ => None,
        }
    }

    const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
}

impl SortKey {
    #[must_use]
    pub const fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

/// Fixed popularity ordering used by `hot`.
pub const HOT_SORT: [SortKey; 4] = [
    SortKey::desc(SortField::Likes),
    SortKey::desc(SortField::Comments),
    SortKey::desc(SortField::Visits),
    SortKey::desc(SortField::CreatedAt),
];

/// Which article fields a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Every field.
    Full,
    /// Everything except content, rendered content and state.
    Public,
    /// Title, creation time, counters, tags and thumbnail.
    Hot,
    /// Everything except raw content (public single-article read).
    Detail,
}

impl Projection {
    /// Shape a stored article with its populated references.
    #[must_use]
    pub fn view(self, article: Article, category: Option<Category>, tags: Vec<Tag>) -> ArticleView {
        let Article {
            id,
            title,
            content,
            rendered_content,
            description,
            thumb,
            keywords,
            extends,
            state,
            meta,
            created_at,
            updated_at,
            ..
        } = article;

        if self == Self::Hot {
            return ArticleView {
                id,
                title: Some(title),
                tag: Some(tags),
                thumb,
                meta: Some(meta),
                created_at: Some(created_at),
                ..ArticleView::default()
            };
        }

        let show_content = self == Self::Full;
        let show_rendered = matches!(self, Self::Full | Self::Detail);
        let show_state = matches!(self, Self::Full | Self::Detail);
        ArticleView {
            id,
            title: Some(title),
            content: show_content.then_some(content),
            rendered_content: show_rendered.then_some(rendered_content),
            description,
            category,
            tag: Some(tags),
            thumb,
            keywords: Some(keywords),
            extends: Some(extends),
            state: show_state.then_some(state),
            meta: Some(meta),
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }
}

/// Article filter. Every present field narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub state: Option<ArticleState>,
    /// Literal, case-sensitive substring of title or description.
    pub keyword: Option<String>,
    /// Resolved category id (possibly the sentinel).
    pub category: Option<String>,
    /// Resolved tag id (possibly the sentinel).
    pub tag: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

impl ArticleFilter {
    /// Render as a `WHERE` clause over the `articles a` alias, appending
    /// bound values to `params`. Empty when nothing constrains.
    pub fn where_clause(&self, params: &mut Vec<libsql::Value>) -> String {
        let mut conditions: Vec<String> = Vec::new();

        if let Some(state) = self.state {
            params.push(libsql::Value::Integer(i64::from(state.as_i8())));
            conditions.push(format!("a.state = ?{}", params.len()));
        }
        if let Some(ref keyword) = self.keyword {
            params.push(libsql::Value::Text(keyword.clone()));
            let n = params.len();
            conditions.push(format!(
                "(instr(a.title, ?{n}) > 0 OR instr(COALESCE(a.description, ''), ?{n}) > 0)"
            ));
        }
        if let Some(ref category) = self.category {
            params.push(libsql::Value::Text(category.clone()));
            conditions.push(format!("a.category_id = ?{}", params.len()));
        }
        if let Some(ref tag) = self.tag {
            params.push(libsql::Value::Text(tag.clone()));
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM article_tags t WHERE t.article_id = a.id AND t.tag_id = ?{})",
                params.len()
            ));
        }
        if let Some(ref after) = self.created_after {
            params.push(libsql::Value::Text(format_datetime(after)));
            conditions.push(format!("a.created_at >= ?{}", params.len()));
        }
        if let Some(ref before) = self.created_before {
            params.push(libsql::Value::Text(format_datetime(before)));
            conditions.push(format!("a.created_at <= ?{}", params.len()));
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        }
    }
}

/// Category and tag exactly as the caller sent them, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedRefs {
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// A fully built list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: ArticleFilter,
    pub sort: Vec<SortKey>,
    /// 1-indexed.
    pub page: u32,
    pub limit: u32,
    pub projection: Projection,
}

impl ListQuery {
    /// Parse everything that does not need storage.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for a non-numeric, zero or
    /// oversized `page`/`pageSize`.
    pub fn parse(
        params: &ListParams,
        authorized: bool,
        settings: &BlogSettings,
    ) -> Result<(Self, UnresolvedRefs), ServiceError> {
        let (page, limit) = parse_window(
            params.page.as_ref(),
            params.page_size.as_ref(),
            settings.page_size,
            settings.max_page_size,
        )?;

        let state = if authorized {
            params
                .state
                .as_ref()
                .and_then(ArticleState::from_raw)
                .filter(|s| ArticleState::PATCHABLE.contains(s))
        } else {
            Some(ArticleState::Published)
        };

        let filter = ArticleFilter {
            state,
            keyword: non_empty(params.keyword.as_deref()),
            category: None,
            tag: None,
            created_after: params.start_date.as_deref().and_then(parse_user_date),
            created_before: params.end_date.as_deref().and_then(parse_user_date),
        };

        let hot = params.hot.as_ref().is_some_and(is_truthy);
        let sort = if hot {
            HOT_SORT.to_vec()
        } else {
            with_tiebreak(params.sort.as_ref().map_or_else(Vec::new, sort_or_default))
        };

        let projection = match (authorized, hot) {
            (true, _) => Projection::Full,
            (false, true) => Projection::Hot,
            (false, false) => Projection::Public,
        };

        let refs = UnresolvedRefs {
            category: non_empty(params.category.as_deref()),
            tag: non_empty(params.tag.as_deref()),
        };

        Ok((
            Self {
                filter,
                sort,
                page,
                limit,
                projection,
            },
            refs,
        ))
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// `ORDER BY` clause. Rows tied on every key fall back to insertion order
    /// in the direction of the creation-time key.
    #[must_use]
    pub fn order_clause(&self) -> String {
        let mut parts: Vec<String> = self
            .sort
            .iter()
            .map(|k| format!("{} {}", k.field.column(), k.direction.sql()))
            .collect();
        let rowid_dir = self
            .sort
            .iter()
            .find(|k| k.field == SortField::CreatedAt)
            .map_or(Direction::Desc, |k| k.direction);
        parts.push(format!("a.rowid {}", rowid_dir.sql()));
        format!("ORDER BY {}", parts.join(", "))
    }
}

impl BlogService {
    /// Build a list query, resolving category and tag names to ids.
    ///
    /// An unknown name resolves to the sentinel id, so the query matches
    /// nothing instead of everything.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for bad pagination input.
    pub async fn build_list_query(
        &self,
        params: &ListParams,
        authorized: bool,
    ) -> Result<ListQuery, ServiceError> {
        let (mut query, refs) = ListQuery::parse(params, authorized, self.settings())?;
        if let Some(ref category) = refs.category {
            query.filter.category = Some(self.resolve_category(category).await);
        }
        if let Some(ref tag) = refs.tag {
            query.filter.tag = Some(self.resolve_tag(tag).await);
        }
        Ok(query)
    }
}

/// Parse a page number and page size.
///
/// Absent, `null` or empty values take the defaults. Anything else must be
/// a positive integer (as a number or a numeric string); the page size is
/// also capped at `max_size`.
///
/// # Errors
///
/// Returns `ServiceError::Validation` naming the offending parameter.
pub fn parse_window(
    page: Option<&Value>,
    page_size: Option<&Value>,
    default_size: u32,
    max_size: u32,
) -> Result<(u32, u32), ServiceError> {
    let page = positive_int(page, "page")?.unwrap_or(1);
    let limit = positive_int(page_size, "pageSize")?.unwrap_or(default_size);
    if limit > max_size {
        return Err(ServiceError::Validation(format!(
            "pageSize must not exceed {max_size}"
        )));
    }
    Ok((page, limit))
}

fn positive_int(raw: Option<&Value>, name: &str) -> Result<Option<u32>, ServiceError> {
    let invalid = || ServiceError::Validation(format!("{name} must be a positive integer"));
    let n = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<u32>().map_err(|_| invalid())?,
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid)?,
        Some(_) => return Err(invalid()),
    };
    if n == 0 {
        return Err(invalid());
    }
    Ok(Some(n))
}

/// `hot` is set unless it is `false`, `0`, `"false"`, `"0"`, `""` or `null`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !matches!(s.as_str(), "" | "false" | "0"),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Parse a sort descriptor, logging and falling back to the default on failure.
fn sort_or_default(raw: &Value) -> Vec<SortKey> {
    match parse_sort(raw) {
        Ok(keys) => keys,
        Err(error) => {
            tracing::error!(%error, "unparsable sort descriptor, using default order");
            Vec::new()
        }
    }
}

/// Parse `{"field": 1 | -1, ...}` or its JSON string form.
///
/// # Errors
///
/// Returns a description of the first problem: invalid JSON, a non-object
/// descriptor, an unknown field or an unknown direction.
pub fn parse_sort(raw: &Value) -> Result<Vec<SortKey>, String> {
    let parsed;
    let descriptor = match raw {
        Value::String(s) if s.trim().is_empty() => return Ok(Vec::new()),
        Value::String(s) => {
            parsed = serde_json::from_str::<Value>(s).map_err(|e| e.to_string())?;
            &parsed
        }
        other => other,
    };
    let Value::Object(entries) = descriptor else {
        return Err(format!("sort must be an object, got {descriptor}"));
    };

    let mut keys: Vec<SortKey> = Vec::with_capacity(entries.len());
    for (key, dir) in entries {
        let field = SortField::from_key(key).ok_or_else(|| format!("unknown sort field '{key}'"))?;
        let direction =
            Direction::from_value(dir).ok_or_else(|| format!("bad direction for '{key}': {dir}"))?;
        if !keys.iter().any(|k| k.field == field) {
            keys.push(SortKey { field, direction });
        }
    }
    Ok(keys)
}

/// Append creation time descending unless the sort already orders by it.
fn with_tiebreak(mut keys: Vec<SortKey>) -> Vec<SortKey> {
    if !keys.iter().any(|k| k.field == SortField::CreatedAt) {
        keys.push(SortKey::desc(SortField::CreatedAt));
    }
    keys
}
