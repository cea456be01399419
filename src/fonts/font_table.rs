//! Font id → font specification lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Typographic properties of one upstream font id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font size in points
    pub size: f32,
    /// Font family name
    pub family: String,
    /// Text color, usually `#rrggbb`
    pub color: String,
}

impl FontSpec {
    /// Create a font spec.
    pub fn new(size: f32, family: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
            color: color.into(),
        }
    }
}

/// A font declaration as reported by the upstream extractor.
///
/// Every attribute except the id is optional on the wire; missing attributes
/// fall back to `size = 0`, `family = "Unknown"` and `color = "#000000"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontSpecRecord {
    /// Font id referenced by fragments
    pub id: String,
    /// Font size
    #[serde(default)]
    pub size: Option<f32>,
    /// Font family
    #[serde(default)]
    pub family: Option<String>,
    /// Text color
    #[serde(default)]
    pub color: Option<String>,
}

impl From<&FontSpecRecord> for FontSpec {
    fn from(record: &FontSpecRecord) -> Self {
        let size = record.size.filter(|s| s.is_finite()).unwrap_or(0.0);
        FontSpec {
            size,
            family: record
                .family
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            color: record
                .color
                .clone()
                .unwrap_or_else(|| "#000000".to_string()),
        }
    }
}

/// Font table keyed by font id.
///
/// Ordered so that iteration (and therefore everything derived from it) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontTable {
    fonts: BTreeMap<String, FontSpec>,
}

impl FontTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from upstream records. Later duplicates of an id win.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_sections::fonts::{FontSpecRecord, FontTable};
    ///
    /// let records = vec![FontSpecRecord {
    ///     id: "0".to_string(),
    ///     size: Some(12.0),
    ///     family: Some("Times".to_string()),
    ///     color: None,
    /// }];
    /// let table = FontTable::from_records(&records);
    /// assert_eq!(table.size_of("0"), Some(12.0));
    /// assert_eq!(table.get("0").unwrap().color, "#000000");
    /// ```
    pub fn from_records(records: &[FontSpecRecord]) -> Self {
        let mut table = Self::new();
        for record in records {
            table.insert(record.id.clone(), FontSpec::from(record));
        }
        log::debug!("Font table built: {} font definitions", table.len());
        table
    }

    /// Add or replace a font.
    pub fn insert(&mut self, id: impl Into<String>, spec: FontSpec) {
        self.fonts.insert(id.into(), spec);
    }

    /// Look up a font by id.
    pub fn get(&self, id: &str) -> Option<&FontSpec> {
        self.fonts.get(id)
    }

    /// Size of the font with the given id.
    pub fn size_of(&self, id: &str) -> Option<f32> {
        self.get(id).map(|spec| spec.size)
    }

    /// Number of fonts in the table.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True when the table holds no fonts.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Iterate fonts in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FontSpec)> {
        self.fonts.iter().map(|(id, spec)| (id.as_str(), spec))
    }
}

/// Font resolution for one page.
///
/// A page-local table shadows the document table, since some extractors
/// declare fonts inside each page and do not keep ids stable across pages.
#[derive(Debug, Clone, Copy)]
pub struct FontLookup<'a> {
    document: &'a FontTable,
    page: Option<&'a FontTable>,
}

impl<'a> FontLookup<'a> {
    /// Lookup backed only by the document table.
    pub fn new(document: &'a FontTable) -> Self {
        Self {
            document,
            page: None,
        }
    }

    /// Lookup that consults `page` before the document table.
    pub fn with_page(document: &'a FontTable, page: &'a FontTable) -> Self {
        let page = if page.is_empty() { None } else { Some(page) };
        Self { document, page }
    }

    /// Resolve a font id.
    pub fn get(&self, id: &str) -> Option<&'a FontSpec> {
        self.page
            .and_then(|table| table.get(id))
            .or_else(|| self.document.get(id))
    }

    /// Resolve a font id to its size.
    pub fn size_of(&self, id: &str) -> Option<f32> {
        self.get(id).map(|spec| spec.size)
    }
}
