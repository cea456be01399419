//! Document input and output records.
//!
//! Input mirrors what an upstream layout extractor emits: a document-level
//! font table and a list of pages, each with optional page-local fonts and
//! positioned text fragments. Every field is optional on the wire because
//! real extractor output is frequently incomplete.

use crate::fonts::FontSpecRecord;
use crate::layout::FragmentRecord;
use crate::structure::OutputRow;
use serde::{Deserialize, Serialize};

/// One source document as delivered by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Identifier copied onto every output row
    #[serde(default)]
    pub source_id: String,
    /// Fonts declared for the whole document
    #[serde(default)]
    pub fonts: Vec<FontSpecRecord>,
    /// Pages; `None` means the page list is missing entirely
    #[serde(default)]
    pub pages: Option<Vec<PageInput>>,
}

/// One page of input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageInput {
    /// 1-based page number; defaults to the page's position in the list
    pub number: Option<u32>,
    /// Page width
    pub width: Option<f32>,
    /// Page height
    pub height: Option<f32>,
    /// Fonts declared on this page, shadowing document fonts with the same id
    pub fonts: Vec<FontSpecRecord>,
    /// Positioned text runs
    #[serde(alias = "text")]
    pub fragments: Vec<FragmentRecord>,
}

/// Structure recovered from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Identifier of the source document
    pub source_id: String,
    /// Font size classified as body text
    pub body_size: Option<f32>,
    /// Number of header levels (K)
    pub header_depth: u32,
    /// Rows in document order
    pub rows: Vec<OutputRow>,
}

impl StructuredDocument {
    /// Rows emitted on `page`.
    pub fn rows_on_page(&self, page: u32) -> impl Iterator<Item = &OutputRow> {
        self.rows.iter().filter(move |r| r.page_number == page)
    }

    /// Total characters of body text.
    pub fn body_chars(&self) -> usize {
        self.rows.iter().map(|r| r.body_text.chars().count()).sum()
    }
}
