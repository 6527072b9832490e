//! Result screen: radar chart, top power, score bars, and the coaching report.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use super::{radar, theme};
use crate::catalog::Catalog;
use crate::formatter::{ReportBlock, parse_report};
use crate::ranking::Ranking;
use crate::report::ReportState;
use crate::scoring::CategoryTotals;
use crate::session::Session;

const BAR_WIDTH: usize = 20;
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub const IDLE_REPORT_TEXT: &str = "분석 데이터를 가져오지 못했습니다.";
pub const DISABLED_REPORT_TEXT: &str = "AI 리포트 요청이 꺼져 있습니다. 점수와 차트를 중심으로 결과를 확인해 주세요.";

/// View-only state for the result screen
#[derive(Debug, Clone, Default)]
pub struct ResultView {
    pub scroll: u16,
    pub tick: usize,
    pub status: Option<String>,
}

/// `value / scale` as a fixed-width bar of filled and empty cells.
pub fn bar(value: u32, scale: u32, width: usize) -> (String, String) {
    let filled = if scale == 0 {
        0
    } else {
        ((value.min(scale) as usize * width) + scale as usize / 2) / scale as usize
    };
    ("█".repeat(filled), "░".repeat(width - filled))
}

pub fn render_result(frame: &mut Frame, area: Rect, session: &Session<'_>, view: &ResultView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(18),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    render_summary(frame, chunks[0], session);

    let report = Paragraph::new(report_lines(session, view.tick))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border())
                .title(" AI 핵심 개발 전략 리포트 "),
        )
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    frame.render_widget(report, chunks[1]);

    let mut help = vec![
        Span::styled("g", theme::selected_a()),
        Span::styled(
            " 재분석  ",
            if session.report().is_analyzing() {
                theme::muted()
            } else {
                Style::default()
            },
        ),
        Span::styled("p", theme::selected_a()),
        Span::raw(" 저장  "),
        Span::styled("n", theme::selected_a()),
        Span::raw(" 다시 진단하기  "),
        Span::styled("↑/↓", theme::selected_a()),
        Span::raw(" 스크롤  "),
        Span::styled("q", theme::selected_a()),
        Span::raw(" 종료"),
    ];
    if let Some(status) = &view.status {
        help.push(Span::raw("   "));
        help.push(Span::styled(status.clone(), theme::status()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(help)).alignment(Alignment::Center),
        chunks[2],
    );
}

/// Chart, top power card, and score bars. Also used for exported documents.
pub fn render_summary(frame: &mut Frame, area: Rect, session: &Session<'_>) {
    let catalog = session.catalog();
    let totals = session.totals();
    let ranking = Ranking::new(&totals);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .title(Span::styled(" 리더십 파워 프로필 결과 ", theme::title()))
        .title_alignment(Alignment::Center);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    radar::render_radar(
        frame,
        columns[0],
        Block::default(),
        catalog,
        &totals,
        &ranking,
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(columns[1]);

    frame.render_widget(top_power_card(catalog, &ranking), right[0]);
    frame.render_widget(
        Paragraph::new(score_lines(catalog, &ranking)),
        right[1],
    );
}

fn top_power_card<'a>(catalog: &'a Catalog, ranking: &Ranking) -> Paragraph<'a> {
    let mut lines = vec![Line::from(Span::styled("나의 핵심 파워", theme::muted()))];
    if let Some(info) = ranking
        .top_power()
        .and_then(|(category, _)| catalog.info(category))
    {
        lines.push(Line::from(Span::styled(
            info.name,
            Style::default()
                .fg(theme::INDIGO)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::raw(info.description));
    }
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::INDIGO)),
        )
        .wrap(Wrap { trim: true })
}

fn score_lines(catalog: &Catalog, ranking: &Ranking) -> Vec<Line<'static>> {
    let scale = catalog.max_category_total();
    ranking
        .ordered()
        .iter()
        .filter_map(|(category, value)| {
            let info = catalog.info(*category)?;
            let color = Style::default().fg(theme::category_color(info));
            let (filled, empty) = bar(*value, scale, BAR_WIDTH);
            Some(Line::from(vec![
                Span::styled(
                    format!(" {} ", category),
                    color.add_modifier(Modifier::REVERSED | Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:<8}", info.short_name()),
                    theme::label(ranking.emphasis(*category)),
                ),
                Span::styled(filled, color),
                Span::styled(empty, theme::muted()),
                Span::styled(format!(" {:>2}점", value), theme::header()),
            ]))
        })
        .collect()
}

/// Lines for the report pane, followed by the category glossary.
pub fn report_lines(session: &Session<'_>, tick: usize) -> Vec<Line<'static>> {
    let mut lines = match session.report().state() {
        ReportState::Requesting { .. } => vec![
            Line::raw(""),
            Line::from(vec![
                Span::styled(
                    format!("{} ", SPINNER[tick % SPINNER.len()]),
                    theme::title(),
                ),
                Span::styled("실무 전략을 도출하고 있습니다...", theme::header()),
            ]),
            Line::from(Span::styled(
                "간결하고 명확한 개발 전략을 구성하는 중입니다.",
                theme::muted(),
            )),
        ],
        ReportState::Ready(outcome) => parse_report(outcome.text())
            .iter()
            .map(ReportBlock::to_line)
            .collect(),
        ReportState::Idle if !session.report_enabled() => {
            vec![Line::from(Span::styled(DISABLED_REPORT_TEXT, theme::muted()))]
        }
        ReportState::Idle => vec![Line::from(Span::styled(IDLE_REPORT_TEXT, theme::muted()))],
    };

    lines.push(Line::raw(""));
    lines.extend(glossary_lines(session.catalog(), &session.totals()));
    lines
}

fn glossary_lines(catalog: &Catalog, totals: &CategoryTotals) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("영향력의 {}가지 원천 상세 설명", catalog.categories().len()),
        theme::header(),
    ))];
    for info in catalog.categories() {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(theme::category_color(info))),
            Span::styled(info.name, theme::header()),
            Span::styled(format!(" ({}점)", totals.get(info.category)), theme::muted()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", info.description),
            theme::muted(),
        )));
    }
    lines
}
