//! Error types for document structure extraction.
//!
//! Most conditions in a real corpus are recoverable: a broken fragment is
//! skipped, an empty page yields no rows, an unknown font id is treated as
//! body text. Only a document without a usable page list is reported to the
//! caller as a failure.

/// Result type alias for structure extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rebuilding document structure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fragment is missing its text or geometry
    #[error("Malformed fragment on page {page}: {reason}")]
    MalformedFragment {
        /// Page the fragment belongs to
        page: u32,
        /// What was wrong with the fragment
        reason: String,
    },

    /// Page has no usable fragments
    #[error("Page {page} has no usable text fragments")]
    EmptyPage {
        /// Page number
        page: u32,
    },

    /// Font id not present in any font table
    #[error("Unresolvable font id: '{0}'")]
    UnresolvableFontId(String),

    /// Page list absent or corrupt for the whole document
    #[error("Structural failure: {0}")]
    StructuralFailure(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
