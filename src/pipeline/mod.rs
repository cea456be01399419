//! Document structure pipeline.
//!
//! ```text
//! DocumentInput
//!     ↓
//! [collect_fragments] (FragmentRecord → Fragment, malformed skipped)
//!     ↓
//! [FontRoleClassifier] (document-wide barrier: size → Body / Header(level))
//!     ↓
//! [reconstruct_lines] (per page, independent)
//!     ↓
//! [PageStructureBuilder] (left fold over pages, threading HeaderContext)
//!     ↓
//! StructuredDocument
//! ```
//!
//! # Key Design Principles
//!
//! 1. **Recoverable by default**: a broken fragment, an empty page or an
//!    unknown font never aborts a document. Only a missing page list does.
//!
//! 2. **Document-wide roles**: font roles are decided once from every page,
//!    so a heading size means the same level on every page.
//!
//! 3. **Ordered fold**: the header hierarchy is the only cross-page state and
//!    it flows through the pages strictly in page-number order.
//!
//! 4. **Unified Configuration**: All thresholds in [`StructureConfig`].

pub mod config;
pub mod document;

// Re-export main types
pub use config::{
    ContinuationConfig, ContinuationStrategyType, LineConfig, LineSpacingConfig, ParagraphConfig,
    StructureConfig, ToleranceConfig,
};
pub use document::{DocumentInput, PageInput, StructuredDocument};

use crate::error::{Error, Result};
use crate::fonts::{FontLookup, FontTable};
use crate::layout::{collect_fragments, reconstruct_lines, FontRoleClassifier, Fragment, Line};
use crate::structure::{create_policy, ContinuationPolicy, HeaderContext, PageStructureBuilder};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A page after validation, before line reconstruction.
struct PreparedPage {
    number: u32,
    width: Option<f32>,
    fonts: FontTable,
    fragments: Vec<Fragment>,
}

/// A page ready to be folded.
struct LinedPage {
    number: u32,
    width: Option<f32>,
    fonts: FontTable,
    lines: Vec<Line>,
}

/// The structure extraction pipeline - orchestrates the full flow.
///
/// # Examples
///
/// ```
/// use pdf_sections::pipeline::StructurePipeline;
///
/// let json = r#"{
///     "source_id": "memo",
///     "fonts": [{"id": "0", "size": 12}, {"id": "1", "size": 18}],
///     "pages": [{
///         "number": 1,
///         "fragments": [
///             {"text": "Summary", "top": 10, "left": 50,
///              "width": 80, "height": 18, "font_id": "1"},
///             {"text": "All systems nominal.", "top": 40, "left": 50,
///              "width": 160, "height": 12, "font_id": "0"}
///         ]
///     }]
/// }"#;
///
/// let doc = StructurePipeline::new().process_json(json).unwrap();
/// assert_eq!(doc.header_depth, 1);
/// assert_eq!(doc.rows.len(), 1);
/// assert_eq!(doc.rows[0].header(1), Some("Summary"));
/// assert_eq!(doc.rows[0].body_text, "All systems nominal.");
/// ```
pub struct StructurePipeline {
    config: StructureConfig,
    continuation_policy: Box<dyn ContinuationPolicy>,
}

impl StructurePipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(StructureConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: StructureConfig) -> Self {
        let policy = create_policy(&config.continuation);
        Self {
            config,
            continuation_policy: policy,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    /// Rebuild the structure of one document.
    ///
    /// 1. Validate every page's fragments
    /// 2. Classify font roles over the whole document
    /// 3. Reconstruct lines per page
    /// 4. Fold pages in page-number order, threading the header hierarchy
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralFailure`] when the document has no page list.
    pub fn process(&self, input: &DocumentInput) -> Result<StructuredDocument> {
        let pages = input.pages.as_ref().ok_or_else(|| {
            Error::StructuralFailure(format!("document '{}' has no page list", input.source_id))
        })?;

        let doc_fonts = FontTable::from_records(&input.fonts);

        let mut prepared: Vec<PreparedPage> = pages
            .iter()
            .enumerate()
            .map(|(idx, page)| {
                let number = page.number.unwrap_or(idx as u32 + 1);
                PreparedPage {
                    number,
                    width: page.width.filter(|w| w.is_finite() && *w > 0.0),
                    fonts: FontTable::from_records(&page.fonts),
                    fragments: collect_fragments(&page.fragments, number),
                }
            })
            .collect();
        // Stable: pages sharing a number keep their input order
        prepared.sort_by_key(|p| p.number);

        let mut classifier = FontRoleClassifier::new();
        for page in &prepared {
            let lookup = FontLookup::with_page(&doc_fonts, &page.fonts);
            for fragment in &page.fragments {
                classifier.add_fragment(fragment, &lookup);
            }
        }
        let roles = classifier.finish();

        let lined = self.reconstruct_pages(prepared);

        // Margin for pages that do not declare a width
        let document_right_edge = lined
            .iter()
            .flat_map(|page| page.lines.iter().map(|line| line.right))
            .reduce(f32::max);

        let builder = PageStructureBuilder::new(
            &input.source_id,
            &roles,
            self.continuation_policy.as_ref(),
            &self.config,
        );

        let mut context = HeaderContext::new();
        let mut rows = Vec::new();
        for page in &lined {
            let lookup = FontLookup::with_page(&doc_fonts, &page.fonts);
            let right_edge = page.width.or(document_right_edge);
            let (next, page_rows) =
                builder.process_page(context, page.number, &page.lines, &lookup, right_edge);
            context = next;
            rows.extend(page_rows);
        }

        log::info!(
            "Document '{}': {} pages, {} header levels, {} rows",
            input.source_id,
            lined.len(),
            roles.header_depth(),
            rows.len()
        );

        Ok(StructuredDocument {
            source_id: input.source_id.clone(),
            body_size: roles.body_size(),
            header_depth: roles.header_depth(),
            rows,
        })
    }

    /// Parse a JSON document and rebuild its structure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralFailure`] when the JSON cannot be parsed as
    /// a document or has no page list.
    pub fn process_json(&self, json: &str) -> Result<StructuredDocument> {
        let input: DocumentInput = serde_json::from_str(json)
            .map_err(|e| Error::StructuralFailure(format!("invalid document JSON: {}", e)))?;
        self.process(&input)
    }

    /// Process independent documents, one result per input in input order.
    pub fn process_batch(&self, inputs: &[DocumentInput]) -> Vec<Result<StructuredDocument>> {
        #[cfg(feature = "parallel")]
        {
            inputs.par_iter().map(|input| self.process(input)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            inputs.iter().map(|input| self.process(input)).collect()
        }
    }

    fn reconstruct_pages(&self, pages: Vec<PreparedPage>) -> Vec<LinedPage> {
        let build = |page: PreparedPage| LinedPage {
            number: page.number,
            width: page.width,
            fonts: page.fonts,
            lines: reconstruct_lines(page.fragments, &self.config),
        };

        #[cfg(feature = "parallel")]
        {
            pages.into_par_iter().map(build).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            pages.into_iter().map(build).collect()
        }
    }
}

impl Default for StructurePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontSpecRecord;
    use crate::layout::FragmentRecord;

    fn font(id: &str, size: f32) -> FontSpecRecord {
        FontSpecRecord {
            id: id.to_string(),
            size: Some(size),
            family: None,
            color: None,
        }
    }

    fn record(
        text: &str,
        top: f32,
        left: f32,
        width: f32,
        height: f32,
        font: &str,
    ) -> FragmentRecord {
        FragmentRecord {
            text: Some(text.to_string()),
            top: Some(top),
            left: Some(left),
            width: Some(width),
            height: Some(height),
            font_id: Some(font.to_string()),
        }
    }

    fn page(number: Option<u32>, fragments: Vec<FragmentRecord>) -> PageInput {
        PageInput {
            number,
            fragments,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_pages_is_structural_failure() {
        let input = DocumentInput {
            source_id: "x".to_string(),
            fonts: vec![],
            pages: None,
        };
        let err = StructurePipeline::new().process(&input).unwrap_err();
        assert!(matches!(err, Error::StructuralFailure(_)));
    }

    #[test]
    fn test_invalid_json_is_structural_failure() {
        let err = StructurePipeline::new().process_json("{not json").unwrap_err();
        assert!(matches!(err, Error::StructuralFailure(_)));
    }

    #[test]
    fn test_empty_page_list_yields_no_rows() {
        let input = DocumentInput {
            source_id: "x".to_string(),
            fonts: vec![],
            pages: Some(vec![]),
        };
        let doc = StructurePipeline::new().process(&input).unwrap();
        assert!(doc.rows.is_empty());
        assert_eq!(doc.header_depth, 0);
        assert_eq!(doc.body_size, None);
    }

    #[test]
    fn test_pages_folded_in_number_order() {
        let input = DocumentInput {
            source_id: "doc".to_string(),
            fonts: vec![font("0", 12.0), font("1", 20.0)],
            pages: Some(vec![
                page(Some(2), vec![record("Continued body", 10.0, 50.0, 200.0, 12.0, "0")]),
                page(
                    Some(1),
                    vec![
                        record("Chapter", 10.0, 50.0, 100.0, 20.0, "1"),
                        record("Opening body text", 40.0, 50.0, 200.0, 12.0, "0"),
                    ],
                ),
            ]),
        };
        let doc = StructurePipeline::new().process(&input).unwrap();
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[0].page_number, 1);
        assert_eq!(doc.rows[1].page_number, 2);
        assert_eq!(doc.rows[1].header(1), Some("Chapter"));
    }

    #[test]
    fn test_missing_page_number_defaults_to_position() {
        let input = DocumentInput {
            source_id: "doc".to_string(),
            fonts: vec![font("0", 12.0)],
            pages: Some(vec![
                page(None, vec![record("One", 10.0, 50.0, 30.0, 12.0, "0")]),
                page(None, vec![record("Two", 10.0, 50.0, 30.0, 12.0, "0")]),
            ]),
        };
        let doc = StructurePipeline::new().process(&input).unwrap();
        let pages: Vec<u32> = doc.rows.iter().map(|r| r.page_number).collect();
        assert_eq!(pages, vec![1, 2]);
    }

    #[test]
    fn test_page_fonts_shadow_document_fonts() {
        let mut second = page(
            Some(2),
            vec![
                record("Local heading", 10.0, 50.0, 100.0, 20.0, "7"),
                record("Body body body body", 40.0, 50.0, 200.0, 12.0, "0"),
            ],
        );
        second.fonts = vec![font("7", 20.0)];
        let input = DocumentInput {
            source_id: "doc".to_string(),
            fonts: vec![font("0", 12.0), font("7", 12.0)],
            pages: Some(vec![
                page(Some(1), vec![record("Plain words here", 10.0, 50.0, 200.0, 12.0, "7")]),
                second,
            ]),
        };
        let doc = StructurePipeline::new().process(&input).unwrap();
        assert_eq!(doc.header_depth, 1);
        assert_eq!(doc.rows[0].body_text, "Plain words here");
        assert!(doc.rows[0].headers.is_empty());
        assert_eq!(doc.rows[1].header(1), Some("Local heading"));
    }

    #[test]
    fn test_contents_page_without_width_uses_document_margin() {
        // Headings-only page; the body page sets the margin at x = 540
        let wide_body = |text: &str, top: f32| record(text, top, 50.0, 490.0, 12.0, "0");
        let input = DocumentInput {
            source_id: "doc".to_string(),
            fonts: vec![font("0", 12.0), font("1", 20.0)],
            pages: Some(vec![
                page(
                    Some(1),
                    vec![
                        record("1. Introduction and background", 10.0, 50.0, 352.0, 20.0, "1"),
                        record("2. Methods and materials", 32.0, 50.0, 302.0, 20.0, "1"),
                        record("3. Results", 54.0, 50.0, 142.0, 20.0, "1"),
                    ],
                ),
                page(
                    Some(2),
                    vec![
                        wide_body("Body text running across the whole measure.", 10.0),
                        wide_body("A second line of body text keeps volume up.", 26.0),
                    ],
                ),
            ]),
        };
        let doc = StructurePipeline::new().process(&input).unwrap();
        let page_one: Vec<_> = doc.rows_on_page(1).collect();
        assert_eq!(page_one.len(), 3);
        assert!(page_one.iter().all(|r| r.is_orphan()));
        assert_eq!(page_one[1].header(1), Some("2. Methods and materials"));
        assert_eq!(doc.rows[3].header(1), Some("3. Results"));
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let ok = DocumentInput {
            source_id: "ok".to_string(),
            fonts: vec![font("0", 12.0)],
            pages: Some(vec![page(Some(1), vec![record("Text", 0.0, 0.0, 30.0, 12.0, "0")])]),
        };
        let broken = DocumentInput {
            source_id: "broken".to_string(),
            fonts: vec![],
            pages: None,
        };
        let results = StructurePipeline::new().process_batch(&[ok, broken]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().source_id, "ok");
        assert!(results[1].is_err());
    }

    #[test]
    fn test_config_accessor() {
        let config = StructureConfig::new().with_word_gap(5.0);
        let pipeline = StructurePipeline::with_config(config.clone());
        assert_eq!(pipeline.config(), &config);
    }
}
