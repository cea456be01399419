//! Font tables.
//!
//! The upstream extractor reports each text run with a font id; the font
//! table resolves that id to its size, family and color. Only the size takes
//! part in role classification, but the full spec is kept for consumers.

pub mod font_table;

pub use font_table::{FontLookup, FontSpec, FontSpecRecord, FontTable};
