//! Header hierarchy reconstruction.
//!
//! Turns classified lines into rows that pair every paragraph with the chain
//! of headers governing it. The hierarchy lives in a [`HeaderContext`] that
//! is threaded from page to page; each page is processed by a
//! [`PageStructureBuilder`], and same-level header lines are merged or split
//! by a pluggable [`ContinuationPolicy`].

pub mod continuation;
pub mod header_context;
pub mod page_builder;
pub mod row;

pub use continuation::{
    create_policy, ContinuationContext, ContinuationPolicy, GapPolicy, LineFillPolicy,
    SameLevelPolicy,
};
pub use header_context::HeaderContext;
pub use page_builder::PageStructureBuilder;
pub use row::OutputRow;
