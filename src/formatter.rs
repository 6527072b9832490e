//! Line-oriented formatting of generated report text.
//!
//! The model is asked for Markdown, but only a flat subset is honored: three
//! heading levels, single-level list items, blank spacers and paragraphs.
//! Inline emphasis is left as-is.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// One rendered line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBlock {
    Heading { level: u8, text: String },
    ListItem(String),
    Spacer,
    Paragraph(String),
}

impl ReportBlock {
    pub fn text(&self) -> &str {
        match self {
            ReportBlock::Heading { text, .. } => text,
            ReportBlock::ListItem(text) | ReportBlock::Paragraph(text) => text,
            ReportBlock::Spacer => "",
        }
    }

    /// Styled terminal line for the block.
    pub fn to_line(&self) -> Line<'static> {
        match self {
            ReportBlock::Heading { level: 1, text } => Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Indexed(62))
                    .add_modifier(Modifier::BOLD),
            )),
            ReportBlock::Heading { level: 2, text } => Line::from(vec![
                Span::styled("▌ ", Style::default().fg(Color::Indexed(105))),
                Span::styled(text.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            ReportBlock::Heading { text, .. } => Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )),
            ReportBlock::ListItem(text) => Line::from(vec![
                Span::raw("  • "),
                Span::styled(text.clone(), Style::default().fg(Color::Gray)),
            ]),
            ReportBlock::Spacer => Line::raw(""),
            ReportBlock::Paragraph(text) => Line::from(text.clone()),
        }
    }

    /// Plain-text rendering used by the exporter.
    pub fn to_plain(&self) -> String {
        match self {
            ReportBlock::Heading { level, text } => {
                format!("{} {}", "#".repeat(*level as usize), text)
            }
            ReportBlock::ListItem(text) => format!("  - {}", text),
            ReportBlock::Spacer => String::new(),
            ReportBlock::Paragraph(text) => text.clone(),
        }
    }
}

/// Classify each line of `raw` by its leading marker.
pub fn parse_report(raw: &str) -> Vec<ReportBlock> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split('\n').map(classify_line).collect()
}

fn classify_line(line: &str) -> ReportBlock {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if let Some(rest) = line.strip_prefix("# ") {
        return ReportBlock::Heading {
            level: 1,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return ReportBlock::Heading {
            level: 2,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return ReportBlock::Heading {
            level: 3,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
    {
        return ReportBlock::ListItem(rest.to_string());
    }
    if line.trim().is_empty() {
        return ReportBlock::Spacer;
    }
    ReportBlock::Paragraph(line.to_string())
}
