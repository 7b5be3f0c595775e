//! Document identifier shape and the "not found" sentinel.
//!
//! Identifiers are 24 hex characters: 4 bytes of creation seconds followed by
//! 8 random bytes, generated by the store. The timestamp half is never zero,
//! so the all-zero identifier is well-formed but can never name a document.

/// Length of a document identifier in hex characters.
pub const ID_LEN: usize = 24;

/// Well-formed identifier that no stored document can carry.
///
/// Filters built around it match nothing, which is how an unresolved
/// category or tag name narrows a list to the empty set.
pub const NOT_FOUND_ID: &str = "000000000000000000000000";

/// Check whether `value` has the canonical identifier shape: 24 lowercase
/// hex characters, the only form the store generates.
///
/// Existence is not checked.
#[must_use]
pub fn is_identifier(value: &str) -> bool {
    value.len() == ID_LEN && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Check whether `value` is the "not found" sentinel.
#[must_use]
pub fn is_sentinel(value: &str) -> bool {
    value == NOT_FOUND_ID
}

/// SQL expression producing a fresh identifier.
///
/// `printf('%08x', seconds)` keeps the timestamp half fixed-width; the random
/// half comes from `randomblob(8)`.
pub const GENERATE_ID_SQL: &str =
    "SELECT printf('%08x', CAST(strftime('%s', 'now') AS INTEGER)) || lower(hex(randomblob(8)))";
