//! Per-page structure state machine.
//!
//! Lines are walked top to bottom. Header lines accumulate into a header
//! buffer, body lines into a body buffer; each buffer is committed when a
//! line of the other kind (or a new header) arrives. A header that is
//! replaced before it produced any body still gets a row of its own, so no
//! heading disappears from the output.
//!
//! The document's [`HeaderContext`] is taken by value and handed back, which
//! lets the caller fold pages in order without shared mutable state.

use crate::error::Error;
use crate::fonts::FontLookup;
use crate::layout::{estimate_line_spacing, Line, Role, RoleMap};
use crate::pipeline::config::StructureConfig;
use crate::structure::continuation::{ContinuationContext, ContinuationPolicy};
use crate::structure::header_context::HeaderContext;
use crate::structure::row::OutputRow;

/// Builds rows for one page at a time against document-level roles.
pub struct PageStructureBuilder<'a> {
    source_id: &'a str,
    roles: &'a RoleMap,
    policy: &'a dyn ContinuationPolicy,
    config: &'a StructureConfig,
}

impl<'a> PageStructureBuilder<'a> {
    /// Create a builder for one document.
    pub fn new(
        source_id: &'a str,
        roles: &'a RoleMap,
        policy: &'a dyn ContinuationPolicy,
        config: &'a StructureConfig,
    ) -> Self {
        Self {
            source_id,
            roles,
            policy,
            config,
        }
    }

    /// Walk one page's lines and emit its rows.
    ///
    /// Returns the context to pass to the next page. At the end of the page
    /// pending header and body text are committed, but the active header
    /// stays active so body text at the top of the next page still belongs
    /// to it.
    ///
    /// `right_edge` is the margin that wrapped header lines are measured
    /// against. When `None`, the widest line on this page is used, which on
    /// a page holding only short headings underestimates the margin.
    pub fn process_page(
        &self,
        context: HeaderContext,
        page_number: u32,
        lines: &[Line],
        fonts: &FontLookup<'_>,
        right_edge: Option<f32>,
    ) -> (HeaderContext, Vec<OutputRow>) {
        if lines.is_empty() {
            log::warn!("{}", Error::EmptyPage { page: page_number });
            return (context, Vec::new());
        }

        let word_gap = self.config.line.word_gap;
        let paragraph_factor = self.config.paragraph.gap_factor;
        let page_right_edge = right_edge
            .unwrap_or_else(|| lines.iter().map(|l| l.right).fold(f32::MIN, f32::max));
        let line_spacing_limit =
            estimate_line_spacing(lines, &self.config.continuation.line_spacing);

        let mut state = PageState {
            context,
            rows: Vec::new(),
            header_buffer: Vec::new(),
            body_buffer: Vec::new(),
            source_id: self.source_id,
            page_number,
        };

        let mut prev: Option<&Line> = None;
        for line in lines {
            let font_size = self.font_size(line.font_id(), fonts);
            let gap = prev.map_or(0.0, |p| line.top - p.bottom);
            let text = line.text(word_gap);

            match self.roles.role_for_font(line.font_id(), fonts) {
                Role::Header(level) => {
                    let continues = state.context.active_level() == Some(level)
                        && !state.header_buffer.is_empty()
                        && self.policy.is_continuation(&ContinuationContext {
                            gap,
                            font_size,
                            prev_line: prev,
                            page_right_edge,
                            line_spacing_limit,
                        });

                    if continues {
                        state.header_buffer.push(text);
                    } else {
                        state.commit_header();
                        state.commit_body();
                        state.commit_orphan();
                        state.context.activate(level);
                        state.header_buffer.push(text);
                    }
                },
                Role::Body => {
                    state.commit_header();
                    if !state.body_buffer.is_empty() && gap > paragraph_factor * font_size {
                        state.commit_body();
                    }
                    state.body_buffer.push(text);
                },
            }

            prev = Some(line);
        }

        state.commit_header();
        state.commit_body();
        state.commit_orphan();

        log::debug!("Page {}: {} lines, {} rows", page_number, lines.len(), state.rows.len());
        (state.context, state.rows)
    }

    fn font_size(&self, font_id: &str, fonts: &FontLookup<'_>) -> f32 {
        match fonts.size_of(font_id) {
            Some(size) => size,
            None => {
                log::debug!("{}", Error::UnresolvableFontId(font_id.to_string()));
                self.config.default_font_size
            },
        }
    }
}

/// Join buffered line texts with single spaces.
///
/// A line ending in `-` was broken inside a word, so the next line is
/// appended directly and the hyphen is kept.
fn join_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for text in lines {
        if !out.is_empty() && !out.ends_with('-') {
            out.push(' ');
        }
        out.push_str(text);
    }
    out
}

struct PageState<'a> {
    context: HeaderContext,
    rows: Vec<OutputRow>,
    header_buffer: Vec<String>,
    body_buffer: Vec<String>,
    source_id: &'a str,
    page_number: u32,
}

impl PageState<'_> {
    /// Publish the buffered header text at the active level.
    fn commit_header(&mut self) {
        if self.header_buffer.is_empty() {
            return;
        }
        if let Some(level) = self.context.active_level() {
            let text = join_lines(&self.header_buffer);
            self.context.set(level, text);
        }
        self.header_buffer.clear();
    }

    fn commit_body(&mut self) {
        if self.body_buffer.is_empty() {
            return;
        }
        let body = join_lines(&self.body_buffer);
        self.body_buffer.clear();
        self.rows
            .push(self.context.to_row(self.source_id, self.page_number, body));
        self.context.mark_body();
    }

    /// Emit an empty-body row for an active header that never got body text.
    fn commit_orphan(&mut self) {
        if self.context.active_level().is_some() && !self.context.has_body() {
            self.rows
                .push(self.context.to_row(self.source_id, self.page_number, String::new()));
            self.context.mark_body();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{FontSpec, FontTable};
    use crate::layout::{group_into_lines, Fragment, FontRoleClassifier};
    use crate::structure::continuation::{GapPolicy, LineFillPolicy, SameLevelPolicy};

    // Font "1" = 20pt (H1), "2" = 16pt (H2), "0" = 12pt (body)
    fn table() -> FontTable {
        let mut table = FontTable::new();
        table.insert("0", FontSpec::new(12.0, "Times", "#000000"));
        table.insert("1", FontSpec::new(20.0, "Times", "#000000"));
        table.insert("2", FontSpec::new(16.0, "Times", "#000000"));
        table
    }

    fn roles() -> RoleMap {
        let mut classifier = FontRoleClassifier::new();
        classifier.add(12.0, 1000);
        classifier.add(20.0, 10);
        classifier.add(16.0, 10);
        classifier.finish()
    }

    fn frag(text: &str, top: f32, width: f32, font: &str) -> Fragment {
        let height = match font {
            "1" => 20.0,
            "2" => 16.0,
            _ => 12.0,
        };
        Fragment::new(text, top, 50.0, width, height, font)
    }

    fn run(
        context: HeaderContext,
        page: u32,
        fragments: Vec<Fragment>,
        policy: &dyn ContinuationPolicy,
    ) -> (HeaderContext, Vec<OutputRow>) {
        run_with_edge(context, page, fragments, policy, None)
    }

    fn run_with_edge(
        context: HeaderContext,
        page: u32,
        fragments: Vec<Fragment>,
        policy: &dyn ContinuationPolicy,
        right_edge: Option<f32>,
    ) -> (HeaderContext, Vec<OutputRow>) {
        let table = table();
        let roles = roles();
        let config = StructureConfig::default();
        let builder = PageStructureBuilder::new("doc", &roles, policy, &config);
        let lines = group_into_lines(fragments, 2.0);
        builder.process_page(context, page, &lines, &FontLookup::new(&table), right_edge)
    }

    #[test]
    fn test_empty_page_passes_context_through() {
        let mut ctx = HeaderContext::new();
        ctx.set(1, "Kept");
        let (out, rows) = run(ctx.clone(), 4, vec![], &SameLevelPolicy);
        assert!(rows.is_empty());
        assert_eq!(out, ctx);
    }

    #[test]
    fn test_body_before_any_header() {
        let (ctx, rows) = run(
            HeaderContext::new(),
            1,
            vec![frag("Preamble text", 0.0, 200.0, "0")],
            &SameLevelPolicy,
        );
        assert_eq!(rows.len(), 1);
        assert!(rows[0].headers.is_empty());
        assert_eq!(rows[0].body_text, "Preamble text");
        assert_eq!(ctx.active_level(), None);
    }

    #[test]
    fn test_header_then_body() {
        let (_, rows) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("Introduction", 0.0, 200.0, "1"),
                frag("First line", 25.0, 200.0, "0"),
                frag("second line", 39.0, 200.0, "0"),
            ],
            &SameLevelPolicy,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].header(1), Some("Introduction"));
        assert_eq!(rows[0].body_text, "First line second line");
    }

    #[test]
    fn test_paragraph_break_on_large_gap() {
        let (_, rows) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("Title", 0.0, 100.0, "1"),
                frag("Para one", 30.0, 200.0, "0"),
                // gap 28 > 0.6 × 12
                frag("Para two", 70.0, 200.0, "0"),
            ],
            &SameLevelPolicy,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].body_text, "Para one");
        assert_eq!(rows[1].body_text, "Para two");
        assert_eq!(rows[1].header(1), Some("Title"));
    }

    #[test]
    fn test_orphan_header_emitted() {
        let (_, rows) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("Chapter", 0.0, 100.0, "1"),
                frag("Section", 40.0, 100.0, "2"),
                frag("Body", 70.0, 100.0, "0"),
            ],
            &SameLevelPolicy,
        );
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_orphan());
        assert_eq!(rows[0].header(1), Some("Chapter"));
        assert_eq!(rows[0].header(2), None);
        assert_eq!(rows[1].header(1), Some("Chapter"));
        assert_eq!(rows[1].header(2), Some("Section"));
        assert_eq!(rows[1].body_text, "Body");
    }

    #[test]
    fn test_trailing_header_is_orphan_and_stays_active() {
        let (ctx, rows) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("Body", 0.0, 100.0, "0"),
                frag("Closing", 40.0, 100.0, "2"),
            ],
            &SameLevelPolicy,
        );
        assert_eq!(rows.len(), 2);
        assert!(rows[1].is_orphan());
        assert_eq!(rows[1].header(2), Some("Closing"));
        assert_eq!(ctx.active_level(), Some(2));
        assert!(ctx.has_body());
    }

    #[test]
    fn test_header_carries_to_next_page() {
        let (ctx, _) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("Chapter", 0.0, 100.0, "1"),
                frag("Body one", 30.0, 100.0, "0"),
            ],
            &SameLevelPolicy,
        );
        let (_, rows) = run(ctx, 2, vec![frag("Body two", 0.0, 100.0, "0")], &SameLevelPolicy);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].page_number, 2);
        assert_eq!(rows[0].header(1), Some("Chapter"));
        assert_eq!(rows[0].body_text, "Body two");
    }

    #[test]
    fn test_same_level_policy_merges_consecutive_headers() {
        let (_, rows) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("Part one", 0.0, 100.0, "1"),
                frag("Part two", 60.0, 100.0, "1"),
                frag("Body", 100.0, 100.0, "0"),
            ],
            &SameLevelPolicy,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].header(1), Some("Part one Part two"));
    }

    #[test]
    fn test_gap_policy_splits_distant_headers() {
        let policy = GapPolicy::new(1.5);
        let (_, rows) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("Part one", 0.0, 100.0, "1"),
                // gap 40 >= 1.5 × 20
                frag("Part two", 60.0, 100.0, "1"),
                frag("Body", 100.0, 100.0, "0"),
            ],
            &policy,
        );
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_orphan());
        assert_eq!(rows[0].header(1), Some("Part one"));
        assert_eq!(rows[1].header(1), Some("Part two"));
    }

    #[test]
    fn test_line_fill_policy_separates_short_entries() {
        let policy = LineFillPolicy::new(1.5, 80.0);
        let (_, rows) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("A long heading that runs across the page", 0.0, 500.0, "2"),
                frag("and wraps", 18.0, 90.0, "2"),
                frag("Short entry", 36.0, 90.0, "2"),
                frag("Body", 60.0, 500.0, "0"),
            ],
            &policy,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].header(2),
            Some("A long heading that runs across the page and wraps")
        );
        assert!(rows[0].is_orphan());
        assert_eq!(rows[1].header(2), Some("Short entry"));
        assert_eq!(rows[1].body_text, "Body");
    }

    #[test]
    fn test_header_after_body_of_same_level_is_new() {
        let (_, rows) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("First", 0.0, 100.0, "1"),
                frag("Body one", 30.0, 100.0, "0"),
                frag("Second", 50.0, 100.0, "1"),
                frag("Body two", 80.0, 100.0, "0"),
            ],
            &SameLevelPolicy,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].header(1), Some("First"));
        assert_eq!(rows[0].body_text, "Body one");
        assert_eq!(rows[1].header(1), Some("Second"));
        assert_eq!(rows[1].body_text, "Body two");
    }

    #[test]
    fn test_contents_page_entries_measured_against_page_width() {
        let policy = LineFillPolicy::new(1.5, 80.0);
        // Entries end at x = 402, 352 and 192
        let entries = vec![
            frag("1. Introduction and background", 0.0, 352.0, "1"),
            frag("2. Methods and materials", 22.0, 302.0, "1"),
            frag("3. Results", 44.0, 142.0, "1"),
        ];

        let (ctx, rows) = run_with_edge(HeaderContext::new(), 1, entries, &policy, Some(612.0));
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.is_orphan()));
        assert_eq!(rows[0].header(1), Some("1. Introduction and background"));
        assert_eq!(rows[1].header(1), Some("2. Methods and materials"));
        assert_eq!(rows[2].header(1), Some("3. Results"));
        assert_eq!(ctx.get(1), Some("3. Results"));
    }

    #[test]
    fn test_hyphenated_header_joined_without_space() {
        let policy = LineFillPolicy::new(1.5, 80.0);
        let (_, rows) = run_with_edge(
            HeaderContext::new(),
            1,
            vec![
                frag("Inter-", 0.0, 60.0, "1"),
                frag("national standards", 22.0, 180.0, "1"),
                frag("Body", 50.0, 100.0, "0"),
            ],
            &policy,
            Some(612.0),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].header(1), Some("Inter-national standards"));
    }

    #[test]
    fn test_join_lines() {
        let lines = vec!["well-".to_string(), "known".to_string(), "fact".to_string()];
        assert_eq!(join_lines(&lines), "well-known fact");
        assert_eq!(join_lines(&[]), "");
    }

    #[test]
    fn test_higher_rank_header_orphans_pending_subheader() {
        let (_, rows) = run(
            HeaderContext::new(),
            1,
            vec![
                frag("A", 0.0, 100.0, "1"),
                frag("Body one", 30.0, 100.0, "0"),
                frag("B", 50.0, 100.0, "2"),
                frag("C", 80.0, 100.0, "1"),
                frag("Body two", 110.0, 100.0, "0"),
            ],
            &SameLevelPolicy,
        );
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].body_text, "Body one");

        let orphan = &rows[1];
        assert!(orphan.is_orphan());
        assert_eq!(orphan.header(1), Some("A"));
        assert_eq!(orphan.header(2), Some("B"));

        assert_eq!(rows[2].header(1), Some("C"));
        assert_eq!(rows[2].header(2), None);
        assert_eq!(rows[2].body_text, "Body two");
    }
}
