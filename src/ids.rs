//! Element ids of the form `<prefix>-<key>`.
//!
//! The board markup names every column `column-<id>` and every task
//! `task-<id>`. The key is the segment after the first `-`, stopping at the
//! next `-` if one follows, and must be a run of ASCII digits.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use crate::error::BoardError;

/// A parsed element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementId {
    /// Text before the first `-` (e.g. `"task"`).
    pub prefix: String,
    /// Numeric key after the first `-`, kept as the original text.
    pub key: String,
}

impl ElementId {
    /// Parse an element id such as `"task-7"`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidElementId`] when the id has no `-`, or the
    /// key segment is empty or not all digits.
    pub fn parse(raw: &str) -> Result<Self, BoardError> {
        let mut parts = raw.split('-');
        let prefix = parts.next().unwrap_or_default();
        let Some(key) = parts.next() else {
            return Err(BoardError::InvalidElementId(raw.to_owned()));
        };
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BoardError::InvalidElementId(raw.to_owned()));
        }
        Ok(Self { prefix: prefix.to_owned(), key: key.to_owned() })
    }

    /// Parse an id and require a specific prefix.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidElementId`] when parsing fails or the
    /// prefix differs.
    pub fn parse_with_prefix(raw: &str, prefix: &str) -> Result<Self, BoardError> {
        let id = Self::parse(raw)?;
        if id.prefix != prefix {
            return Err(BoardError::InvalidElementId(raw.to_owned()));
        }
        Ok(id)
    }
}

/// Build the element id for a key, e.g. `element_id("column", "2")` is `"column-2"`.
#[must_use]
pub fn element_id(prefix: &str, key: &str) -> String {
    format!("{prefix}-{key}")
}
