//! Unified configuration for the structure extraction pipeline.
//!
//! Every heuristic multiplier used by line assembly, paragraph splitting and
//! header continuation lives here as a named field. The defaults are tuned for
//! `pdftohtml -xml` output, whose coordinates are integer pixels.

use serde::{Deserialize, Serialize};

/// Line tolerance used when a page has fewer than two fragments.
pub const DEFAULT_FALLBACK_TOLERANCE: f32 = 3.0;

/// Lower bound of any computed line tolerance.
pub const DEFAULT_MIN_TOLERANCE: f32 = 2.0;

/// Horizontal gap above which a space is inserted between fragments.
pub const DEFAULT_WORD_GAP: f32 = 3.0;

/// Paragraph break when the gap to the previous line exceeds this × font size.
pub const DEFAULT_PARAGRAPH_GAP_FACTOR: f32 = 0.6;

/// Same-level header lines closer than this × font size may be one title.
pub const DEFAULT_HEADER_GAP_FACTOR: f32 = 1.5;

/// Distance from the right edge beyond which a line counts as ending early.
pub const DEFAULT_LINE_FILL_SLACK: f32 = 80.0;

/// Font size assumed for lines whose font id cannot be resolved.
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Configuration for the per-page line tolerance estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Tolerance for pages with fewer than two fragments.
    ///
    /// Default: 3.0
    pub fallback: f32,

    /// Minimum tolerance; also the floor of the no-jitter estimate.
    ///
    /// Default: 2.0
    pub min: f32,

    /// `top` differences below this ratio of the dominant height are jitter.
    /// Larger differences are real line breaks.
    ///
    /// Default: 0.5
    pub jitter_height_ratio: f32,

    /// Standard deviations of jitter added to its mean.
    ///
    /// Default: 2.0
    pub stdev_multiplier: f32,

    /// Upper clamp as a ratio of the dominant height.
    ///
    /// Default: 0.3
    pub max_height_ratio: f32,

    /// Tolerance as a ratio of the dominant height when no jitter was seen.
    ///
    /// Default: 0.1
    pub no_jitter_height_ratio: f32,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK_TOLERANCE,
            min: DEFAULT_MIN_TOLERANCE,
            jitter_height_ratio: 0.5,
            stdev_multiplier: 2.0,
            max_height_ratio: 0.3,
            no_jitter_height_ratio: 0.1,
        }
    }
}

/// Configuration for assembling fragments into lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Horizontal gap (in page units) above which a space separates two
    /// fragments of the same line.
    ///
    /// Default: 3.0
    pub word_gap: f32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            word_gap: DEFAULT_WORD_GAP,
        }
    }
}

/// Configuration for splitting body text into paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphConfig {
    /// A body line starts a new paragraph when its gap to the previous line
    /// exceeds this multiple of its font size. Useful range is 0.6 to 1.5.
    ///
    /// Default: 0.6
    pub gap_factor: f32,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        Self {
            gap_factor: DEFAULT_PARAGRAPH_GAP_FACTOR,
        }
    }
}

/// Configuration for the page line-spacing estimate (vertical merge limit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineSpacingConfig {
    /// Limit used when a page has fewer than two lines or no usable gaps.
    ///
    /// Default: 5.0
    pub fallback: f32,

    /// Gaps at or above this are section breaks and ignored.
    ///
    /// Default: 50.0
    pub max_gap: f32,

    /// Standard deviations added to the dominant gap.
    ///
    /// Default: 0.5
    pub stdev_factor: f32,

    /// Buffer added when only a single gap was measured.
    ///
    /// Default: 2.0
    pub single_gap_buffer: f32,
}

impl Default for LineSpacingConfig {
    fn default() -> Self {
        Self {
            fallback: 5.0,
            max_gap: 50.0,
            stdev_factor: 0.5,
            single_gap_buffer: 2.0,
        }
    }
}

/// Configuration for deciding whether a header line continues the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuationConfig {
    /// The continuation policy to use.
    pub strategy: ContinuationStrategyType,

    /// Same-level header lines whose gap is below this × font size are close
    /// enough to be one wrapped title.
    ///
    /// Default: 1.5
    pub gap_factor: f32,

    /// A previous line whose right edge is further than this from the page's
    /// right edge ended early, so the next line is a new entry.
    ///
    /// Default: 80.0
    pub line_fill_slack: f32,

    /// Page line-spacing estimate used by [`ContinuationStrategyType::LineFill`].
    pub line_spacing: LineSpacingConfig,
}

impl Default for ContinuationConfig {
    fn default() -> Self {
        Self {
            strategy: ContinuationStrategyType::default(),
            gap_factor: DEFAULT_HEADER_GAP_FACTOR,
            line_fill_slack: DEFAULT_LINE_FILL_SLACK,
            line_spacing: LineSpacingConfig::default(),
        }
    }
}

/// Available header continuation policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContinuationStrategyType {
    /// Every consecutive line of the same header level is one header.
    ///
    /// Merges table-of-contents entries into a single title; only suitable
    /// for documents without lists of same-level headings.
    SameLevel,

    /// Same-level lines continue when the vertical gap is small.
    Gap,

    /// Same-level lines continue when the gap is small and the previous line
    /// either ran to the right margin or ended with a hyphen.
    ///
    /// Separates wrapped titles from consecutive short entries.
    #[default]
    LineFill,
}

/// Complete configuration for structure extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Line tolerance estimate
    pub tolerance: ToleranceConfig,

    /// Line assembly
    pub line: LineConfig,

    /// Paragraph splitting
    pub paragraph: ParagraphConfig,

    /// Header continuation
    pub continuation: ContinuationConfig,

    /// Font size for lines with an unresolvable font id.
    ///
    /// Default: 10.0
    pub default_font_size: f32,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self {
            tolerance: ToleranceConfig::default(),
            line: LineConfig::default(),
            paragraph: ParagraphConfig::default(),
            continuation: ContinuationConfig::default(),
            default_font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Set the header continuation policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_sections::pipeline::config::{ContinuationStrategyType, StructureConfig};
    ///
    /// let config = StructureConfig::new().with_continuation(ContinuationStrategyType::Gap);
    /// assert_eq!(config.continuation.strategy, ContinuationStrategyType::Gap);
    /// ```
    pub fn with_continuation(mut self, strategy: ContinuationStrategyType) -> Self {
        self.continuation.strategy = strategy;
        self
    }

    /// Set the paragraph gap factor.
    pub fn with_paragraph_gap_factor(mut self, factor: f32) -> Self {
        self.paragraph.gap_factor = factor;
        self
    }

    /// Set the word gap used when joining fragments of a line.
    pub fn with_word_gap(mut self, gap: f32) -> Self {
        self.line.word_gap = gap;
        self
    }

    /// Set the font size assumed for unresolvable font ids.
    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }
}
