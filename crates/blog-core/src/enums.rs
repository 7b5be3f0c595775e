//! Article publication state.
//!
//! Stored and serialized as a signed integer: `draft = 0`, `published = 1`,
//! `trashed = -1`. Transitions between any pair are allowed; the state is
//! set, never incremented.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Publication lifecycle of an article.
///
/// ```text
/// draft (0) ⇄ published (1) ⇄ trashed (-1)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum ArticleState {
    Trashed,
    #[default]
    Draft,
    Published,
}

impl ArticleState {
    /// Every state an article may hold.
    pub const ALL: [Self; 3] = [Self::Trashed, Self::Draft, Self::Published];

    /// States reachable through the single-article patch path.
    ///
    /// Trashing is bulk-only.
    pub const PATCHABLE: [Self; 2] = [Self::Draft, Self::Published];

    /// Integer representation used in SQL storage and on the wire.
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Trashed => -1,
            Self::Draft => 0,
            Self::Published => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trashed => "trashed",
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Parse a raw inbound value, accepting the integer or its string form.
    ///
    /// `1`, `"1"`, `0`, `"0"`, `-1`, `"-1"` are recognized; everything else
    /// (including `1.0`, `true`, `" 1"`) is `None`.
    #[must_use]
    pub fn from_raw(value: &Value) -> Option<Self> {
        let n = match value {
            Value::Number(n) => n.as_i64()?,
            Value::String(s) => s.parse::<i64>().ok()?,
            _ => return None,
        };
        i8::try_from(n).ok().and_then(|n| Self::try_from(n).ok())
    }
}

impl From<ArticleState> for i8 {
    fn from(state: ArticleState) -> Self {
        state.as_i8()
    }
}

impl TryFrom<i8> for ArticleState {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Trashed),
            0 => Ok(Self::Draft),
            1 => Ok(Self::Published),
            other => Err(format!("unknown article state {other}")),
        }
    }
}

impl TryFrom<i64> for ArticleState {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        i8::try_from(value)
            .map_err(|_| format!("unknown article state {value}"))
            .and_then(Self::try_from)
    }
}

impl fmt::Display for ArticleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for ArticleState {
    fn schema_name() -> Cow<'static, str> {
        "ArticleState".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "integer",
            "enum": [-1, 0, 1],
        })
    }
}
