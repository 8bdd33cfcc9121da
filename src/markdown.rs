// 📝 Markdown Preview - Line-oriented preview of note content
// Not a full markdown engine; just enough structure for a readable panel.

use serde::{Deserialize, Serialize};

// ============================================================================
// PREVIEW MODEL
// ============================================================================

/// One preview line, tagged with how the UI should style it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewLine {
    /// Heading with level 1-6 and stripped text
    Heading { level: u8, text: String },
    /// Bullet or numbered list item with indent depth (spaces / 2)
    ListItem { depth: u8, text: String },
    /// Block quote content
    Quote(String),
    /// Line inside a fenced code block, verbatim
    Code(String),
    /// Horizontal rule
    Rule,
    /// Plain paragraph text
    Text(String),
    /// Blank separator line
    Blank,
}

/// Preview - Rendered note content plus resolved wikilink targets
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preview {
    pub lines: Vec<PreviewLine>,
    /// Vault-relative targets of `[[wikilinks]]` found in the text,
    /// resolved against the source note's directory
    pub links: Vec<String>,
}

// ============================================================================
// RENDERER SEAM
// ============================================================================

/// MarkdownRenderer - Rendering collaborator
///
/// `source_path` is the vault-relative path of the note being rendered;
/// relative link targets are resolved against its directory.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str, source_path: &str) -> Preview;
}

// ============================================================================
// BUILT-IN RENDERER
// ============================================================================

/// PreviewRenderer - Default line-oriented implementation
pub struct PreviewRenderer;

impl MarkdownRenderer for PreviewRenderer {
    fn render(&self, markdown: &str, source_path: &str) -> Preview {
        let source_dir = source_path.rsplit_once('/').map(|(dir, _)| dir);
        let mut preview = Preview::default();
        let mut in_code = false;

        for raw in markdown.lines() {
            let line = raw.trim_end();

            if line.trim_start().starts_with("```") {
                in_code = !in_code;
                continue;
            }
            if in_code {
                preview.lines.push(PreviewLine::Code(line.to_string()));
                continue;
            }

            collect_wikilinks(line, source_dir, &mut preview.links);

            let trimmed = line.trim_start();
            if trimmed.is_empty() {
                preview.lines.push(PreviewLine::Blank);
            } else if let Some(rest) = parse_heading(trimmed) {
                preview.lines.push(rest);
            } else if is_rule(trimmed) {
                preview.lines.push(PreviewLine::Rule);
            } else if let Some(text) = trimmed.strip_prefix("> ") {
                preview.lines.push(PreviewLine::Quote(text.to_string()));
            } else if trimmed == ">" {
                preview.lines.push(PreviewLine::Quote(String::new()));
            } else if let Some(text) = parse_list_item(trimmed) {
                let indent = (line.len() - trimmed.len()) / 2;
                preview.lines.push(PreviewLine::ListItem {
                    depth: indent.min(u8::MAX as usize) as u8,
                    text,
                });
            } else {
                preview.lines.push(PreviewLine::Text(trimmed.to_string()));
            }
        }

        preview
    }
}

fn parse_heading(line: &str) -> Option<PreviewLine> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    let text = rest.strip_prefix(' ')?;
    Some(PreviewLine::Heading {
        level: hashes as u8,
        text: text.trim().to_string(),
    })
}

fn is_rule(line: &str) -> bool {
    line.len() >= 3
        && (line.chars().all(|c| c == '-')
            || line.chars().all(|c| c == '*')
            || line.chars().all(|c| c == '_'))
}

fn parse_list_item(line: &str) -> Option<String> {
    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(text.to_string());
    }
    // Numbered items: "1. text"
    let (num, rest) = line.split_once(". ")?;
    if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) {
        Some(rest.to_string())
    } else {
        None
    }
}

/// Pull `[[target]]` / `[[target|alias]]` link targets out of a line,
/// resolving bare targets relative to the source note's directory.
fn collect_wikilinks(line: &str, source_dir: Option<&str>, links: &mut Vec<String>) {
    let mut rest = line;
    while let Some(start) = rest.find("[[") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("]]") else { break };
        let target = after[..end].split('|').next().unwrap_or("").trim();
        if !target.is_empty() {
            let resolved = if target.contains('/') {
                // Already vault-relative
                format!("{target}.md")
            } else {
                match source_dir {
                    Some(dir) => format!("{dir}/{target}.md"),
                    None => format!("{target}.md"),
                }
            };
            if !links.contains(&resolved) {
                links.push(resolved);
            }
        }
        rest = &after[end + 2..];
    }
}

// ============================================================================
// TESTS
// ============================================================================
