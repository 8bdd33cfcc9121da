// 🗓️ Comparison Panel - One section per configured year
// Resolve → read → preview, or degrade that single section in place.

use crate::markdown::{MarkdownRenderer, Preview, PreviewLine};
use crate::request::ComparisonRequest;
use crate::resolver;
use crate::vault::{NoteFile, NoteStore};
use serde::{Deserialize, Serialize};

/// Fixed panel title
pub const PANEL_TITLE: &str = "Daily Notes - Same Day Across Years";

/// Placeholder shown when no candidate path resolved for a year
pub const NO_NOTE_TEXT: &str = "No daily note found for this date";

// ============================================================================
// PANEL CONTENT MODEL
// ============================================================================

/// Body of one year section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionBody {
    /// Note resolved and read; the handle is captured by value so the
    /// Open action stays bound to this render pass's file even if a
    /// later pass resolves differently
    Preview { file: NoteFile, preview: Preview },
    /// No candidate path resolved (normal outcome, not an error)
    Missing,
    /// Existence check passed but the read failed (racing deletion);
    /// only this section degrades, the rest of the panel renders
    ReadError(String),
}

/// One year section: header label plus body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSection {
    pub year: i32,
    /// Header label, e.g. "2024-06-15"
    pub date_label: String,
    pub body: SectionBody,
}

impl YearSection {
    /// The captured file handle, present iff the note resolved and read
    pub fn file(&self) -> Option<&NoteFile> {
        match &self.body {
            SectionBody::Preview { file, .. } => Some(file),
            _ => None,
        }
    }
}

/// PanelContent - Everything one render pass produced
///
/// Rebuilt wholesale on every render; nothing is patched in place and
/// nothing survives to the next pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelContent {
    pub title: String,
    pub sections: Vec<YearSection>,
}

impl PanelContent {
    /// Plain-text rendering, used by the binary's print mode. Sections
    /// keep request order; a resolved section's wikilink targets appear
    /// as a footer under its preview.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

        for section in &self.sections {
            out.push('\n');
            match &section.body {
                SectionBody::Preview { file, preview } => {
                    out.push_str(&format!("── {} [{}]\n", section.date_label, file.path));
                    for line in &preview.lines {
                        match line {
                            PreviewLine::Heading { level, text } => {
                                out.push_str(&format!("{} {}\n", "#".repeat(*level as usize), text))
                            }
                            PreviewLine::ListItem { depth, text } => {
                                out.push_str(&format!("{}• {}\n", "  ".repeat(*depth as usize), text))
                            }
                            PreviewLine::Quote(text) => out.push_str(&format!("│ {}\n", text)),
                            PreviewLine::Code(text) => out.push_str(&format!("    {}\n", text)),
                            PreviewLine::Rule => out.push_str("──────────\n"),
                            PreviewLine::Text(text) => out.push_str(&format!("{}\n", text)),
                            PreviewLine::Blank => out.push('\n'),
                        }
                    }
                    if !preview.links.is_empty() {
                        out.push_str(&format!("   ↪ Links: {}\n", preview.links.join(", ")));
                    }
                }
                SectionBody::Missing => {
                    out.push_str(&format!("── {}\n   {}\n", section.date_label, NO_NOTE_TEXT));
                }
                SectionBody::ReadError(message) => {
                    out.push_str(&format!("── {}\n   ⚠ {}\n", section.date_label, message));
                }
            }
        }

        out
    }
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// ComparisonPanel - Owns the collaborator seams, renders on demand
pub struct ComparisonPanel<S, R> {
    store: S,
    renderer: R,
}

impl<S: NoteStore, R: MarkdownRenderer> ComparisonPanel<S, R> {
    pub fn new(store: S, renderer: R) -> Self {
        ComparisonPanel { store, renderer }
    }

    /// Render the full panel for one request.
    ///
    /// Sections come out in the request's year order, resolved or not;
    /// a failure in one section never prevents the others from
    /// rendering.
    pub fn render(&self, request: &ComparisonRequest) -> PanelContent {
        let sections = request
            .years
            .iter()
            .map(|&year| self.render_year_section(request, year))
            .collect();

        PanelContent {
            title: PANEL_TITLE.to_string(),
            sections,
        }
    }

    fn render_year_section(&self, request: &ComparisonRequest, year: i32) -> YearSection {
        let date_label = request.date_label(year);

        let body = match resolver::resolve(&self.store, year, &request.month, &request.day) {
            Some(file) => match self.store.read(&file) {
                Ok(content) => {
                    let preview = self.renderer.render(&content, &file.path);
                    SectionBody::Preview { file, preview }
                }
                Err(err) => {
                    log::warn!("failed to read {}: {err:#}", file.path);
                    SectionBody::ReadError(format!("Error reading note: {}", file.path))
                }
            },
            None => SectionBody::Missing,
        };

        YearSection {
            year,
            date_label,
            body,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{PreviewLine, PreviewRenderer};
    use anyhow::{bail, Result};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    /// In-memory store; a `None` body simulates a read failure after a
    /// successful existence check
    struct MapStore {
        files: BTreeMap<String, Option<String>>,
    }

    impl MapStore {
        fn new(entries: &[(&str, Option<&str>)]) -> Self {
            MapStore {
                files: entries
                    .iter()
                    .map(|(p, c)| (p.to_string(), c.map(|s| s.to_string())))
                    .collect(),
            }
        }
    }

    impl NoteStore for MapStore {
        fn is_file(&self, path: &str) -> bool {
            self.files.contains_key(path)
        }

        fn read(&self, file: &NoteFile) -> Result<String> {
            match self.files.get(&file.path) {
                Some(Some(content)) => Ok(content.clone()),
                _ => bail!("read failed for {}", file.path),
            }
        }
    }

    fn june_15_request() -> ComparisonRequest {
        ComparisonRequest::for_date(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(), 3)
    }

    fn panel(entries: &[(&str, Option<&str>)]) -> ComparisonPanel<MapStore, PreviewRenderer> {
        ComparisonPanel::new(MapStore::new(entries), PreviewRenderer)
    }

    #[test]
    fn test_mixed_hits_and_misses() {
        // Only the 2024 root note and the 2023 Journal note exist
        let panel = panel(&[
            ("2024-06-15.md", Some("# 2024")),
            ("Journal/2023-06-15.md", Some("# 2023")),
        ]);
        let content = panel.render(&june_15_request());

        assert_eq!(content.title, PANEL_TITLE);
        assert_eq!(content.sections.len(), 3);

        assert_eq!(content.sections[0].date_label, "2025-06-15");
        assert_eq!(content.sections[0].body, SectionBody::Missing);
        assert!(content.sections[0].file().is_none());

        assert_eq!(content.sections[1].date_label, "2024-06-15");
        assert_eq!(
            content.sections[1].file().unwrap().path,
            "2024-06-15.md"
        );

        assert_eq!(content.sections[2].date_label, "2023-06-15");
        assert_eq!(
            content.sections[2].file().unwrap().path,
            "Journal/2023-06-15.md"
        );
    }

    #[test]
    fn test_section_order_follows_request_order() {
        let panel = panel(&[("2023-06-15.md", Some("x"))]);
        let mut request = june_15_request();
        request.years = vec![2023, 2025, 2024];

        let content = panel.render(&request);
        let years: Vec<i32> = content.sections.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2023, 2025, 2024]);
    }

    #[test]
    fn test_missing_year_has_single_placeholder() {
        let panel = panel(&[]);
        let content = panel.render(&june_15_request());

        for section in &content.sections {
            assert_eq!(section.body, SectionBody::Missing);
            assert!(section.file().is_none());
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let panel = panel(&[("2024-06-15.md", Some("# note"))]);
        let request = june_15_request();

        let first = panel.render(&request);
        let second = panel.render(&request);
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_failure_degrades_only_that_section() {
        // 2024's note exists but cannot be read; 2023's is fine
        let panel = panel(&[
            ("2024-06-15.md", None),
            ("Journal/2023-06-15.md", Some("ok")),
        ]);
        let content = panel.render(&june_15_request());

        assert!(matches!(
            content.sections[1].body,
            SectionBody::ReadError(_)
        ));
        assert!(content.sections[1].file().is_none());
        assert!(matches!(
            content.sections[2].body,
            SectionBody::Preview { .. }
        ));
    }

    #[test]
    fn test_preview_carries_rendered_lines() {
        let panel = panel(&[("2024-06-15.md", Some("# Morning\n- coffee"))]);
        let content = panel.render(&june_15_request());

        let SectionBody::Preview { preview, .. } = &content.sections[1].body else {
            panic!("expected preview");
        };
        assert_eq!(
            preview.lines,
            vec![
                PreviewLine::Heading { level: 1, text: "Morning".into() },
                PreviewLine::ListItem { depth: 0, text: "coffee".into() },
            ]
        );
    }

    #[test]
    fn test_plain_text_includes_link_footer() {
        let panel = panel(&[(
            "Journal/2024-06-15.md",
            Some("# Morning\nsee [[yesterday]] and [[Projects/plan]]"),
        )]);
        let text = panel.render(&june_15_request()).to_plain_text();

        assert!(text.contains("── 2024-06-15 [Journal/2024-06-15.md]"));
        assert!(text.contains("# Morning"));
        assert!(text.contains("↪ Links: Journal/yesterday.md, Projects/plan.md"));
    }

    #[test]
    fn test_plain_text_placeholder_has_no_link_footer() {
        let panel = panel(&[]);
        let text = panel.render(&june_15_request()).to_plain_text();

        assert!(text.contains(NO_NOTE_TEXT));
        assert!(!text.contains("Links:"));
    }

    #[test]
    fn test_captured_handle_survives_store_changes() {
        // First render resolves the root file; clone what the section
        // captured, then re-render against a store where the root file
        // is gone. The captured handle must still point at the old path.
        let request = june_15_request();

        let first = panel(&[("2024-06-15.md", Some("v1"))]).render(&request);
        let captured = first.sections[1].file().unwrap().clone();

        let second = panel(&[("Journal/2024-06-15.md", Some("v2"))]).render(&request);
        assert_eq!(
            second.sections[1].file().unwrap().path,
            "Journal/2024-06-15.md"
        );
        // The earlier render's handle is unaffected
        assert_eq!(captured.path, "2024-06-15.md");
    }
}
