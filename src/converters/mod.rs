//! Output converters for structured documents.
//!
//! Both converters flatten a document into the same fixed column layout:
//! `source_id, page_number, header_level_1 .. header_level_K, body_text`,
//! where K is the document's header depth. Levels a row does not carry are
//! empty strings.
//!
//! # Examples
//!
//! ```
//! use pdf_sections::converters::{OutputConverter, TableConverter};
//! use pdf_sections::pipeline::StructuredDocument;
//!
//! let doc = StructuredDocument {
//!     source_id: "empty".to_string(),
//!     body_size: None,
//!     header_depth: 2,
//!     rows: vec![],
//! };
//! assert_eq!(
//!     TableConverter::columns(doc.header_depth),
//!     vec!["source_id", "page_number", "header_level_1", "header_level_2", "body_text"]
//! );
//! assert_eq!(
//!     TableConverter::new().convert(&doc).unwrap(),
//!     "source_id,page_number,header_level_1,header_level_2,body_text\n"
//! );
//! ```

use crate::error::{Error, Result};
use crate::pipeline::StructuredDocument;
use crate::structure::OutputRow;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Trait for rendering a structured document.
pub trait OutputConverter {
    /// Render the document's rows.
    fn convert(&self, document: &StructuredDocument) -> Result<String>;

    /// Return the name of this converter for debugging.
    fn name(&self) -> &'static str;
}

fn header_column(level: u32) -> String {
    format!("header_level_{}", level)
}

/// Fixed-column table output, rendered as CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableConverter;

impl TableConverter {
    /// Create a table converter.
    pub fn new() -> Self {
        Self
    }

    /// Column names for a document with `depth` header levels.
    pub fn columns(depth: u32) -> Vec<String> {
        let mut columns = Vec::with_capacity(depth as usize + 3);
        columns.push("source_id".to_string());
        columns.push("page_number".to_string());
        columns.extend((1..=depth).map(header_column));
        columns.push("body_text".to_string());
        columns
    }

    /// One row of cells, aligned with [`TableConverter::columns`].
    pub fn cells(row: &OutputRow, depth: u32) -> Vec<String> {
        let mut cells = Vec::with_capacity(depth as usize + 3);
        cells.push(row.source_id.clone());
        cells.push(row.page_number.to_string());
        cells.extend((1..=depth).map(|level| row.header(level).unwrap_or("").to_string()));
        cells.push(row.body_text.clone());
        cells
    }

    /// All rows of the document as cells.
    pub fn rows(document: &StructuredDocument) -> Vec<Vec<String>> {
        document
            .rows
            .iter()
            .map(|row| Self::cells(row, document.header_depth))
            .collect()
    }
}

impl OutputConverter for TableConverter {
    fn convert(&self, document: &StructuredDocument) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(Self::columns(document.header_depth))?;
        for row in &document.rows {
            writer.write_record(Self::cells(row, document.header_depth))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Csv(csv::Error::from(e.into_error())))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn name(&self) -> &'static str {
        "TableConverter"
    }
}

/// JSON array of row objects keyed by the table's column names.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter {
    pretty: bool,
}

impl JsonConverter {
    /// Create a compact JSON converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter producing indented JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// Row view that serializes its keys in column order.
struct ColumnRow<'a> {
    row: &'a OutputRow,
    depth: u32,
}

impl Serialize for ColumnRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.depth as usize + 3))?;
        map.serialize_entry("source_id", &self.row.source_id)?;
        map.serialize_entry("page_number", &self.row.page_number)?;
        for level in 1..=self.depth {
            map.serialize_entry(&header_column(level), self.row.header(level).unwrap_or(""))?;
        }
        map.serialize_entry("body_text", &self.row.body_text)?;
        map.end()
    }
}

impl OutputConverter for JsonConverter {
    fn convert(&self, document: &StructuredDocument) -> Result<String> {
        let rows: Vec<ColumnRow<'_>> = document
            .rows
            .iter()
            .map(|row| ColumnRow {
                row,
                depth: document.header_depth,
            })
            .collect();

        let json = if self.pretty {
            serde_json::to_string_pretty(&rows)?
        } else {
            serde_json::to_string(&rows)?
        };
        Ok(json)
    }

    fn name(&self) -> &'static str {
        "JsonConverter"
    }
}
