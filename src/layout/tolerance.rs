//! Adaptive vertical thresholds derived from each page's own geometry.
//!
//! Fixed pixel constants break as soon as a document uses a different base
//! font size or its renderer adds a little baseline noise. Both estimates
//! here start from the page's dominant measurement and scale from it.

use crate::layout::fragment::Fragment;
use crate::layout::line::Line;
use crate::layout::stats;
use crate::pipeline::config::{LineSpacingConfig, ToleranceConfig};
use crate::utils::safe_float_cmp;

/// Estimate the maximum `top` difference for two fragments to share a line.
///
/// 1. The dominant fragment height (mode, smaller value on ties, median when
///    no height repeats) is taken as the single-line height.
/// 2. Consecutive `top` differences below half that height are jitter.
/// 3. With jitter: `mean + 2σ`, clamped to `[2, 0.3 × height]`.
///    Without jitter: `max(2, 0.1 × height)`.
///
/// Pages with fewer than two fragments get the fixed fallback (3 units).
///
/// # Examples
///
/// ```
/// use pdf_sections::layout::{estimate_tolerance, Fragment};
/// use pdf_sections::pipeline::config::ToleranceConfig;
///
/// let fragments = vec![
///     Fragment::new("Header", 10.0, 0.0, 60.0, 20.0, "1"),
///     Fragment::new("Intro", 10.4, 70.0, 50.0, 20.0, "1"),
///     Fragment::new("This is body.", 40.0, 0.0, 120.0, 12.0, "0"),
///     Fragment::new("Second para.", 80.0, 0.0, 110.0, 12.0, "0"),
/// ];
/// let tolerance = estimate_tolerance(&fragments, &ToleranceConfig::default());
/// assert_eq!(tolerance, 2.0);
/// ```
pub fn estimate_tolerance(fragments: &[Fragment], config: &ToleranceConfig) -> f32 {
    if fragments.len() < 2 {
        return config.fallback;
    }

    let heights: Vec<f32> = fragments.iter().map(Fragment::height).collect();
    let dominant = match stats::mode_or_median(&heights) {
        Some(h) => h,
        None => return config.fallback,
    };

    let mut tops: Vec<f32> = fragments.iter().map(Fragment::top).collect();
    tops.sort_by(|a, b| safe_float_cmp(*a, *b));

    let jitter_limit = dominant * config.jitter_height_ratio;
    let jitter: Vec<f32> = tops
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d >= 0.0 && *d < jitter_limit)
        .collect();

    let tolerance = match stats::mean(&jitter) {
        Some(avg) => {
            let raw = avg + config.stdev_multiplier * stats::sample_stdev(&jitter);
            raw.min(dominant * config.max_height_ratio).max(config.min)
        },
        None => config.min.max(dominant * config.no_jitter_height_ratio),
    };

    log::debug!(
        "Line tolerance {:.2} (dominant height {:.2}, {} jitter samples)",
        tolerance,
        dominant,
        jitter.len()
    );
    tolerance
}

/// Estimate the page's vertical merge limit from finished lines.
///
/// Gaps between consecutive lines (`top` of a line minus `bottom` of the one
/// above) in `[0, max_gap)` are collected; the dominant gap plus half a
/// standard deviation is the largest gap that still reads as "next line of
/// the same block".
pub fn estimate_line_spacing(lines: &[Line], config: &LineSpacingConfig) -> f32 {
    if lines.len() < 2 {
        return config.fallback;
    }

    let gaps: Vec<f32> = lines
        .windows(2)
        .map(|w| w[1].top - w[0].bottom)
        .filter(|g| *g >= 0.0 && *g < config.max_gap)
        .collect();

    let dominant = match stats::mode_or_median(&gaps) {
        Some(g) => g,
        None => return config.fallback,
    };

    if gaps.len() > 1 {
        dominant + config.stdev_factor * stats::sample_stdev(&gaps)
    } else {
        dominant + config.single_gap_buffer
    }
}
