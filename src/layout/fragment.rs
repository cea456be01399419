//! Positioned text fragments.
//!
//! A fragment is one text run as the upstream extractor reports it. Runs are
//! not words: a single word may be split across runs and a run may hold many
//! words, which is why line assembly re-derives spacing from geometry.

use crate::error::{Error, Result};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A text run as delivered by the upstream extractor.
///
/// Every field is optional so that broken upstream data can be represented
/// and rejected per fragment instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FragmentRecord {
    /// Text content
    #[serde(default)]
    pub text: Option<String>,
    /// Top edge
    #[serde(default)]
    pub top: Option<f32>,
    /// Left edge
    #[serde(default)]
    pub left: Option<f32>,
    /// Width
    #[serde(default)]
    pub width: Option<f32>,
    /// Height
    #[serde(default)]
    pub height: Option<f32>,
    /// Font id into the font table
    #[serde(default, alias = "font")]
    pub font_id: Option<String>,
}

/// A validated, immutable text fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Trimmed, non-empty text
    pub text: String,
    /// Bounding box
    pub bbox: Rect,
    /// Font id; empty when the upstream record carried none
    pub font_id: String,
}

impl Fragment {
    /// Create a fragment directly from trusted values.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_sections::layout::Fragment;
    ///
    /// let frag = Fragment::new("Intro", 10.0, 70.0, 50.0, 20.0, "1");
    /// assert_eq!(frag.right(), 120.0);
    /// assert_eq!(frag.bottom(), 30.0);
    /// ```
    pub fn new(
        text: impl Into<String>,
        top: f32,
        left: f32,
        width: f32,
        height: f32,
        font_id: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            bbox: Rect::new(left, top, width, height),
            font_id: font_id.into(),
        }
    }

    /// Validate an upstream record.
    ///
    /// Fails with [`Error::MalformedFragment`] when text is missing or blank,
    /// or when any coordinate is missing, non-finite or a negative extent.
    pub fn from_record(record: &FragmentRecord, page: u32) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedFragment {
            page,
            reason: reason.to_string(),
        };

        let text = record
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| malformed("missing or blank text"))?;

        let top = record.top.ok_or_else(|| malformed("missing top"))?;
        let left = record.left.ok_or_else(|| malformed("missing left"))?;
        let width = record.width.ok_or_else(|| malformed("missing width"))?;
        let height = record.height.ok_or_else(|| malformed("missing height"))?;

        let bbox = Rect::new(left, top, width, height);
        if !bbox.is_well_formed() {
            return Err(malformed(&format!(
                "invalid geometry (top={}, left={}, width={}, height={})",
                top, left, width, height
            )));
        }

        Ok(Self {
            text: text.to_string(),
            bbox,
            font_id: record.font_id.clone().unwrap_or_default(),
        })
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.bbox.top()
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.bbox.left()
    }

    /// Right edge (`left + width`).
    pub fn right(&self) -> f32 {
        self.bbox.right()
    }

    /// Bottom edge (`top + height`).
    pub fn bottom(&self) -> f32 {
        self.bbox.bottom()
    }

    /// Height of the run.
    pub fn height(&self) -> f32 {
        self.bbox.height
    }

    /// Number of characters, used as the volume weight for font classification.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Validate a page's records, skipping malformed ones.
///
/// Each rejected record is logged; the page keeps whatever remains.
pub fn collect_fragments(records: &[FragmentRecord], page: u32) -> Vec<Fragment> {
    let mut fragments = Vec::with_capacity(records.len());
    for record in records {
        match Fragment::from_record(record, page) {
            Ok(fragment) => fragments.push(fragment),
            Err(e) => log::warn!("Skipping fragment: {}", e),
        }
    }
    fragments
}
