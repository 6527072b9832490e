//! Plain-text export of the result screen.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::error::Result;
use crate::formatter::parse_report;
use crate::report::ReportState;
use crate::session::Session;
use crate::tui::result::{DISABLED_REPORT_TEXT, IDLE_REPORT_TEXT, render_summary};

pub const SUMMARY_HEIGHT: u16 = 18;
pub const DEFAULT_WIDTH: u16 = 100;

/// Buffer contents as text, one line per row with trailing blanks removed.
/// Cells covered by a wide glyph are skipped.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut x = area.left();
        while x < area.right() {
            let symbol = buf[(x, y)].symbol();
            let width = Span::raw(symbol).width().max(1) as u16;
            line.push_str(symbol);
            x = x.saturating_add(width);
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Result summary, report and category notes as a printable document.
pub fn render_result_document(session: &Session<'_>, width: u16) -> Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, SUMMARY_HEIGHT))?;
    terminal.draw(|frame| {
        render_summary(frame, Rect::new(0, 0, width, SUMMARY_HEIGHT), session)
    })?;
    let mut doc = buffer_text(terminal.backend().buffer());
    doc.push_str("\n\n# AI 핵심 개발 전략 리포트\n\n");

    match session.report().state() {
        ReportState::Ready(outcome) => {
            for block in parse_report(outcome.text()) {
                doc.push_str(&block.to_plain());
                doc.push('\n');
            }
        }
        ReportState::Requesting { .. } => {
            doc.push_str("실무 전략을 도출하고 있습니다...\n");
        }
        ReportState::Idle if !session.report_enabled() => {
            doc.push_str(DISABLED_REPORT_TEXT);
            doc.push('\n');
        }
        ReportState::Idle => {
            doc.push_str(IDLE_REPORT_TEXT);
            doc.push('\n');
        }
    }

    let catalog = session.catalog();
    let totals = session.totals();
    doc.push_str(&format!(
        "\n# 영향력의 {}가지 원천 상세 설명\n\n",
        catalog.categories().len()
    ));
    for info in catalog.categories() {
        doc.push_str(&format!(
            "- {} ({}점)\n  {}\n",
            info.name,
            totals.get(info.category),
            info.description
        ));
    }
    Ok(doc)
}

pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("leader-power-report-{}.txt", now.format("%Y%m%d-%H%M%S"))
}

/// Write `text` into `dir`, creating it if needed.
pub fn write_document(dir: &Path, text: &str, now: DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now));
    fs::write(&path, text)?;
    tracing::info!("exported result to {}", path.display());
    Ok(path)
}
