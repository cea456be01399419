// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # PDF Sections
//!
//! Rebuild the heading hierarchy of a document from the positioned text
//! fragments an upstream PDF layout extractor emits, and pair every body
//! paragraph with the chain of headings it sits under.
//!
//! ## Core Features
//!
//! - **Adaptive Line Reconstruction**: per-page vertical tolerance estimated
//!   from fragment heights and baseline jitter
//! - **Font Role Classification**: body size by character volume, header
//!   levels ranked by size across the whole document
//! - **Cross-Page Hierarchy**: headers carry across page breaks; a new
//!   ancestor clears its former descendants
//! - **Orphan Headers**: headings without body text still produce a row
//! - **Pluggable Continuation**: wrapped titles vs. lists of same-level
//!   headings decided by a swappable policy
//! - **Tabular Output**: fixed `header_level_1..K` columns as CSV or JSON
//!
//! ## Architecture
//! - **Recoverable Errors**: malformed fragments, empty pages and unknown
//!   fonts are logged and skipped; only a missing page list fails a document
//! - **Pure Page Functions**: line reconstruction runs per page, optionally
//!   in parallel with the `parallel` feature
//!
//! ## Quick Start
//!
//! ```
//! use pdf_sections::converters::{OutputConverter, TableConverter};
//! use pdf_sections::pipeline::{StructureConfig, StructurePipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{
//!     "source_id": "paper",
//!     "fonts": [{"id": "0", "size": 12}, {"id": "1", "size": 20}],
//!     "pages": [{"number": 1, "fragments": [
//!         {"text": "Header", "top": 10, "left": 0, "width": 60, "height": 20, "font_id": "1"},
//!         {"text": "Body text.", "top": 40, "left": 0, "width": 100, "height": 12, "font_id": "0"}
//!     ]}]
//! }"#;
//!
//! let pipeline = StructurePipeline::with_config(StructureConfig::default());
//! let doc = pipeline.process_json(json)?;
//!
//! let table = TableConverter::new().convert(&doc)?;
//! assert_eq!(table.lines().nth(1), Some("paper,1,Header,Body text."));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Geometry primitives
pub mod geometry;

// Font tables
pub mod fonts;

// Layout analysis
pub mod layout;

// Header hierarchy
pub mod structure;

// Pipeline architecture
pub mod pipeline;

// Output converters
pub mod converters;

// Re-exports
pub use converters::{JsonConverter, OutputConverter, TableConverter};
pub use error::{Error, Result};
pub use pipeline::{
    DocumentInput, PageInput, StructureConfig, StructurePipeline, StructuredDocument,
};
pub use structure::{HeaderContext, OutputRow};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
