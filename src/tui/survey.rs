use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap};

use super::theme;
use crate::catalog::{POINTS_PER_QUESTION, QuestionPair};
use crate::scoring::ScoreSplit;
use crate::session::Session;

/// Slider cells from "A 강함" (score_a = 3) on the left to "B 강함" on the right.
pub fn slider_line(split: ScoreSplit) -> Line<'static> {
    let selected = (POINTS_PER_QUESTION - split.score_a()) as usize;
    let mut spans = vec![Span::styled("A 강함 ", theme::selected_a())];
    for stop in 0..=POINTS_PER_QUESTION as usize {
        if stop > 0 {
            spans.push(Span::styled("────", theme::muted()));
        }
        if stop == selected {
            spans.push(Span::styled("●", theme::title()));
        } else {
            spans.push(Span::styled("○", theme::muted()));
        }
    }
    spans.push(Span::styled(" B 강함", theme::selected_b()));
    Line::from(spans)
}

pub fn render_survey(frame: &mut Frame, area: Rect, session: &Session<'_>) {
    let Some(question) = session.current_question() else {
        return;
    };
    let split = session.current_split().unwrap_or_default();
    let total = session.catalog().len();
    let position = session
        .catalog()
        .questions()
        .iter()
        .position(|q| q.id == question.id)
        .unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let progress = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border())
                .title(" 진단 진행 중 "),
        )
        .gauge_style(Style::default().fg(theme::INDIGO))
        .ratio(((position + 1) as f64 / total.max(1) as f64).clamp(0.0, 1.0))
        .label(format!("{} / {}", position + 1, total));
    frame.render_widget(progress, chunks[0]);

    let body = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .title(format!(" 문항 {} ", position + 1));
    let body_inner = body.inner(chunks[1]);
    frame.render_widget(body, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body_inner);

    render_statement(frame, columns[0], session, question, Side::A, split);
    render_statement(frame, columns[1], session, question, Side::B, split);

    let slider = Paragraph::new(slider_line(split))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme::border()));
    frame.render_widget(slider, chunks[2]);

    let finish_hint = if session.is_last_question() {
        " Enter 진단 완료 및 결과 보기 "
    } else {
        " Enter 다음 문항 "
    };
    let help = Paragraph::new(Line::from(vec![
        Span::styled("←/→", theme::selected_a()),
        Span::raw(" 점수 조정  "),
        Span::styled("a/b", theme::selected_a()),
        Span::raw(" 한쪽 선택  "),
        Span::styled("↑/↓", theme::selected_a()),
        Span::raw(" 이전/다음  "),
        Span::styled(finish_hint, theme::selected_a()),
        Span::raw(" "),
        Span::styled("r", theme::selected_a()),
        Span::raw(" 결과 보기  "),
        Span::styled("q", theme::selected_a()),
        Span::raw(" 종료"),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

#[derive(Clone, Copy)]
enum Side {
    A,
    B,
}

fn render_statement(
    frame: &mut Frame,
    area: Rect,
    session: &Session<'_>,
    question: &QuestionPair,
    side: Side,
    split: ScoreSplit,
) {
    let (text, category, points, leading, accent) = match side {
        Side::A => (
            question.text_a,
            question.cat_a,
            split.score_a(),
            split.leans_a(),
            theme::selected_a(),
        ),
        Side::B => (
            question.text_b,
            question.cat_b,
            split.score_b(),
            !split.leans_a(),
            theme::selected_b(),
        ),
    };
    let label = session
        .catalog()
        .info(category)
        .map(|info| info.first_word())
        .unwrap_or("");
    let marker = match side {
        Side::A => "A",
        Side::B => "B",
    };

    let border_style = if leading { accent } else { theme::border() };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if leading {
            BorderType::Thick
        } else {
            BorderType::Plain
        })
        .border_style(border_style)
        .title(format!(" {} ", marker));

    let content = Paragraph::new(vec![
        Line::raw(text),
        Line::raw(""),
        Line::from(vec![
            Span::styled(label, theme::muted()),
            Span::raw("  "),
            Span::styled(format!("{}점", points), accent),
        ]),
    ])
    .block(block)
    .wrap(Wrap { trim: true });
    frame.render_widget(content, area);
}
