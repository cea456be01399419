//! Layout analysis for positioned text fragments.
//!
//! This module turns a page's loose fragments into ordered visual lines and
//! decides, across the whole document, which font sizes are body text and
//! which are heading levels:
//! - Fragment validation (malformed upstream records are skipped)
//! - Adaptive line tolerance from fragment heights
//! - Single-sweep line grouping with run-aware spacing
//! - Character-volume font role classification

pub mod font_roles;
pub mod fragment;
pub mod line;
pub mod stats;
pub mod tolerance;

// Re-export main types
pub use font_roles::{FontRoleClassifier, Role, RoleMap};
pub use fragment::{collect_fragments, Fragment, FragmentRecord};
pub use line::{group_into_lines, reconstruct_lines, Line};
pub use tolerance::{estimate_line_spacing, estimate_tolerance};
