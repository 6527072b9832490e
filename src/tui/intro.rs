use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use super::theme;
use crate::catalog::Catalog;

pub fn render_intro(frame: &mut Frame, area: Rect, catalog: &Catalog) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border());
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(inner);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled("Leadership Power Profile", theme::title())),
        Line::raw(""),
        Line::raw("나의 영향력은 어디에서 나오는가?"),
        Line::from(vec![
            Span::raw("French & Raven의 이론을 바탕으로 당신이 주로 사용하는 "),
            Span::styled("7가지 파워 원천", theme::header()),
            Span::raw("을 진단하고, "),
            Span::styled("AI 맞춤 개발 전략", theme::header()),
            Span::raw("을 받아보세요."),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(heading, chunks[0]);

    let how = Paragraph::new(vec![
        Line::raw(format!(
            "• 총 {}개 문항에서 두 가지 항목 중 본인에게 가까운 정도를 선택합니다.",
            catalog.len()
        )),
        Line::raw("• 모든 문항에 응답하면 당신의 영향력 지도가 생성됩니다."),
        Line::raw("• 결과를 통해 자신의 리더십 강점과 보완점을 확인하고, AI 개발 전략을 받아보세요."),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .title(" 진단 방법 "),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(how, chunks[1]);

    let sources: Vec<Line> = catalog
        .categories()
        .iter()
        .map(|info| {
            Line::from(vec![
                Span::styled("● ", Style::default().fg(theme::category_color(info))),
                Span::styled(info.name, theme::header()),
                Span::raw("  "),
                Span::styled(info.description, theme::muted()),
            ])
        })
        .collect();
    let sources = Paragraph::new(sources)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border())
                .title(" 영향력의 원천 "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(sources, chunks[2]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Enter", theme::selected_a()),
        Span::raw(" 진단 시작하기   "),
        Span::styled("q", theme::selected_a()),
        Span::raw(" 종료"),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}
