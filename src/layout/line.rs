//! Visual line reconstruction.
//!
//! Fragments are swept once in `(top, left)` order. A fragment joins the
//! current line when its `top` is within the tolerance of the line's anchor
//! `top`; otherwise it opens a new line. Lines come out top to bottom.

use crate::geometry::Rect;
use crate::layout::fragment::Fragment;
use crate::layout::tolerance::estimate_tolerance;
use crate::pipeline::config::StructureConfig;
use crate::utils::safe_float_cmp;
use std::cmp::Ordering;

/// Fragments judged to lie on the same printed line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Member fragments, sorted left to right once the line is finished
    pub fragments: Vec<Fragment>,
    /// Anchor top: the top of the first fragment swept into the line
    pub top: f32,
    /// Lowest bottom edge of any member
    pub bottom: f32,
    /// Leftmost edge of any member
    pub left: f32,
    /// Rightmost edge of any member
    pub right: f32,
}

impl Line {
    /// Start a line from its first fragment.
    pub fn from_fragment(fragment: Fragment) -> Self {
        Self {
            top: fragment.top(),
            bottom: fragment.bottom(),
            left: fragment.left(),
            right: fragment.right(),
            fragments: vec![fragment],
        }
    }

    /// Add a fragment to the line.
    ///
    /// The anchor `top` is kept; only the other extents grow.
    pub fn push(&mut self, fragment: Fragment) {
        self.bottom = self.bottom.max(fragment.bottom());
        self.left = self.left.min(fragment.left());
        self.right = self.right.max(fragment.right());
        self.fragments.push(fragment);
    }

    fn finish(&mut self) {
        self.fragments
            .sort_by(|a, b| safe_float_cmp(a.left(), b.left()));
    }

    /// Bounding box of the whole line.
    pub fn bbox(&self) -> Rect {
        Rect::new(self.left, self.top, self.right - self.left, self.bottom - self.top)
    }

    /// Font id of the leftmost fragment, which decides the line's role.
    pub fn font_id(&self) -> &str {
        self.fragments
            .first()
            .map(|f| f.font_id.as_str())
            .unwrap_or("")
    }

    /// Concatenated text of the line.
    ///
    /// Fragments are text runs, not words, so a single space is inserted only
    /// where the horizontal gap between neighbours exceeds `word_gap`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_sections::layout::{group_into_lines, Fragment};
    ///
    /// let lines = group_into_lines(
    ///     vec![
    ///         Fragment::new("Intro", 10.0, 70.0, 50.0, 20.0, "1"),
    ///         Fragment::new("Head", 10.0, 0.0, 40.0, 20.0, "1"),
    ///         Fragment::new("er", 10.0, 41.0, 19.0, 20.0, "1"),
    ///     ],
    ///     2.0,
    /// );
    /// assert_eq!(lines[0].text(3.0), "Header Intro");
    /// ```
    pub fn text(&self, word_gap: f32) -> String {
        let mut out = String::new();
        let mut prev: Option<&Fragment> = None;
        for fragment in &self.fragments {
            if let Some(p) = prev {
                if p.bbox.horizontal_gap_to(&fragment.bbox) > word_gap {
                    out.push(' ');
                }
            }
            out.push_str(&fragment.text);
            prev = Some(fragment);
        }
        out
    }

    /// True when the line's rightmost fragment ends with a hyphen.
    pub fn ends_with_hyphen(&self) -> bool {
        self.fragments
            .last()
            .map(|f| f.text.ends_with('-'))
            .unwrap_or(false)
    }
}

/// Group fragments into lines with a fixed vertical tolerance.
///
/// A fragment whose `top` differs from the current line's anchor by exactly
/// `tolerance` still joins the line.
pub fn group_into_lines(mut fragments: Vec<Fragment>, tolerance: f32) -> Vec<Line> {
    fragments.sort_by(|a, b| match safe_float_cmp(a.top(), b.top()) {
        Ordering::Equal => safe_float_cmp(a.left(), b.left()),
        other => other,
    });

    let mut lines: Vec<Line> = Vec::new();
    for fragment in fragments {
        match lines.last_mut() {
            Some(current) if (fragment.top() - current.top).abs() <= tolerance => {
                current.push(fragment);
            },
            _ => lines.push(Line::from_fragment(fragment)),
        }
    }

    for line in &mut lines {
        line.finish();
    }
    lines
}

/// Estimate the page's tolerance and group its fragments into lines.
///
/// Pure per-page function: pages can be reconstructed independently and in
/// any order before their lines are folded into the document.
pub fn reconstruct_lines(fragments: Vec<Fragment>, config: &StructureConfig) -> Vec<Line> {
    let tolerance = estimate_tolerance(&fragments, &config.tolerance);
    group_into_lines(fragments, tolerance)
}
