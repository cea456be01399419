//! Output rows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One emitted row: the header hierarchy in effect and the body text under it.
///
/// Rows are immutable once built. A row with empty `body_text` records a
/// header that had no body of its own (an orphan header).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    /// Identifier of the source document
    pub source_id: String,
    /// Page the row was emitted on (1-based)
    pub page_number: u32,
    /// Header text per level at emission time
    pub headers: BTreeMap<u32, String>,
    /// Paragraph text, empty for orphan headers
    pub body_text: String,
}

impl OutputRow {
    /// Header text at `level`, if set.
    pub fn header(&self, level: u32) -> Option<&str> {
        self.headers.get(&level).map(String::as_str)
    }

    /// Deepest header level present in the row.
    pub fn deepest_level(&self) -> Option<u32> {
        self.headers.keys().next_back().copied()
    }

    /// True for a header emitted without body text.
    pub fn is_orphan(&self) -> bool {
        self.body_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_accessors() {
        let mut headers = BTreeMap::new();
        headers.insert(1, "Chapter".to_string());
        headers.insert(2, "Section".to_string());
        let row = OutputRow {
            source_id: "doc".to_string(),
            page_number: 3,
            headers,
            body_text: String::new(),
        };

        assert_eq!(row.header(1), Some("Chapter"));
        assert_eq!(row.header(3), None);
        assert_eq!(row.deepest_level(), Some(2));
        assert!(row.is_orphan());
    }
}
