//! Document-scoped header hierarchy.
//!
//! The context is the single piece of state that crosses page boundaries.
//! It is passed by value into each page and handed back out, so the document
//! is a left fold over its pages in page order.

use crate::structure::row::OutputRow;
use std::collections::BTreeMap;

/// Current header text per level, plus the header still governing body text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderContext {
    headers: BTreeMap<u32, String>,
    active_level: Option<u32>,
    has_body: bool,
}

impl HeaderContext {
    /// Create an empty context for a new document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header text at `level` and drop every deeper level.
    ///
    /// A new ancestor invalidates all of its former descendants.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_sections::structure::HeaderContext;
    ///
    /// let mut ctx = HeaderContext::new();
    /// ctx.set(1, "Chapter 1");
    /// ctx.set(2, "Scope");
    /// ctx.set(3, "Definitions");
    /// ctx.set(2, "Requirements");
    ///
    /// assert_eq!(ctx.get(1), Some("Chapter 1"));
    /// assert_eq!(ctx.get(2), Some("Requirements"));
    /// assert_eq!(ctx.get(3), None);
    /// ```
    pub fn set(&mut self, level: u32, text: impl Into<String>) {
        self.headers.insert(level, text.into());
        self.headers.retain(|l, _| *l <= level);
    }

    /// Header text at `level`.
    pub fn get(&self, level: u32) -> Option<&str> {
        self.headers.get(&level).map(String::as_str)
    }

    /// Levels currently set, shallowest first.
    pub fn levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.headers.keys().copied()
    }

    /// Number of levels currently set.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// True when no header has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Copy of the current hierarchy.
    pub fn snapshot(&self) -> BTreeMap<u32, String> {
        self.headers.clone()
    }

    /// Build a row carrying the current hierarchy.
    pub fn to_row(&self, source_id: &str, page_number: u32, body_text: String) -> OutputRow {
        OutputRow {
            source_id: source_id.to_string(),
            page_number,
            headers: self.snapshot(),
            body_text,
        }
    }

    /// Level of the header currently governing body text.
    pub fn active_level(&self) -> Option<u32> {
        self.active_level
    }

    /// Whether the active header has produced a row yet.
    pub fn has_body(&self) -> bool {
        self.has_body
    }

    pub(crate) fn activate(&mut self, level: u32) {
        self.active_level = Some(level);
        self.has_body = false;
    }

    pub(crate) fn mark_body(&mut self) {
        self.has_body = true;
    }
}
