//! Header continuation policies.
//!
//! When a header line follows another line of the same header level it is
//! either the wrapped remainder of one long title or the next entry of a list
//! of same-level headings (a table of contents, for instance). Documents
//! disagree on which signal separates the two, so the decision is pluggable.
//!
//! # Available Policies
//!
//! - [`SameLevelPolicy`]: every same-level line continues
//! - [`GapPolicy`]: continues when the vertical gap is small
//! - [`LineFillPolicy`]: small gap and the previous line filled the measure

use crate::layout::Line;
use crate::pipeline::config::{ContinuationConfig, ContinuationStrategyType};

/// Measurements available when judging a header line.
#[derive(Debug, Clone, Copy)]
pub struct ContinuationContext<'a> {
    /// Gap between the previous line's bottom and this line's top
    pub gap: f32,
    /// Font size of this line
    pub font_size: f32,
    /// Previous line on the same page, if any
    pub prev_line: Option<&'a Line>,
    /// Rightmost edge of any line on the page
    pub page_right_edge: f32,
    /// Page vertical merge limit from the line-spacing estimate
    pub line_spacing_limit: f32,
}

/// Decides whether a same-level header line continues the header being read.
pub trait ContinuationPolicy: Send + Sync {
    /// True when the line is part of the header already being accumulated.
    fn is_continuation(&self, ctx: &ContinuationContext<'_>) -> bool;

    /// Return the name of this policy for debugging.
    fn name(&self) -> &'static str;
}

/// Every consecutive same-level line belongs to one header.
pub struct SameLevelPolicy;

impl ContinuationPolicy for SameLevelPolicy {
    fn is_continuation(&self, _ctx: &ContinuationContext<'_>) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "SameLevelPolicy"
    }
}

/// Continues when the gap is below `gap_factor × font size`.
pub struct GapPolicy {
    gap_factor: f32,
}

impl GapPolicy {
    /// Create a gap policy.
    pub fn new(gap_factor: f32) -> Self {
        Self { gap_factor }
    }
}

impl ContinuationPolicy for GapPolicy {
    fn is_continuation(&self, ctx: &ContinuationContext<'_>) -> bool {
        ctx.prev_line.is_some() && ctx.gap < self.gap_factor * ctx.font_size
    }

    fn name(&self) -> &'static str {
        "GapPolicy"
    }
}

/// Continues when the gap is small and the previous line ran to the right
/// margin or broke on a hyphen.
///
/// A previous line that stopped well short of the margin was complete, so
/// the next same-level line is a new entry even when it sits close below.
pub struct LineFillPolicy {
    gap_factor: f32,
    slack: f32,
}

impl LineFillPolicy {
    /// Create a line-fill policy.
    pub fn new(gap_factor: f32, slack: f32) -> Self {
        Self { gap_factor, slack }
    }
}

impl ContinuationPolicy for LineFillPolicy {
    fn is_continuation(&self, ctx: &ContinuationContext<'_>) -> bool {
        let prev = match ctx.prev_line {
            Some(prev) => prev,
            None => return false,
        };

        let gap_limit = ctx.line_spacing_limit.max(self.gap_factor * ctx.font_size);
        if ctx.gap > gap_limit {
            return false;
        }

        let reached_margin = prev.right >= ctx.page_right_edge - self.slack;
        reached_margin || prev.ends_with_hyphen()
    }

    fn name(&self) -> &'static str {
        "LineFillPolicy"
    }
}

/// Create a continuation policy based on configuration.
pub fn create_policy(config: &ContinuationConfig) -> Box<dyn ContinuationPolicy> {
    match config.strategy {
        ContinuationStrategyType::SameLevel => Box::new(SameLevelPolicy),
        ContinuationStrategyType::Gap => Box::new(GapPolicy::new(config.gap_factor)),
        ContinuationStrategyType::LineFill => {
            Box::new(LineFillPolicy::new(config.gap_factor, config.line_fill_slack))
        },
    }
}
