//! Radar chart drawn on a braille canvas.

use std::f64::consts::PI;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;
use ratatui::widgets::canvas::{Canvas, Context, Line as Segment};

use super::theme;
use crate::catalog::Catalog;
use crate::ranking::Ranking;
use crate::scoring::CategoryTotals;

const GRID_RINGS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];
const LABEL_RADIUS: f64 = 1.18;
const BOUND: f64 = 1.45;

/// Unit-circle position of axis `index` out of `count`, starting at the top
/// and moving clockwise.
pub fn axis_point(index: usize, count: usize, radius: f64) -> (f64, f64) {
    if count == 0 {
        return (0.0, 0.0);
    }
    let angle = PI / 2.0 - 2.0 * PI * index as f64 / count as f64;
    (radius * angle.cos(), radius * angle.sin())
}

/// Radius per category, `total / scale` clamped to `0..=1`.
pub fn radii(totals: &CategoryTotals, scale: u32) -> Vec<f64> {
    totals
        .entries()
        .iter()
        .map(|(_, total)| {
            if scale == 0 {
                0.0
            } else {
                (*total as f64 / scale as f64).clamp(0.0, 1.0)
            }
        })
        .collect()
}

pub fn render_radar(
    frame: &mut Frame,
    area: Rect,
    block: Block<'_>,
    catalog: &Catalog,
    totals: &CategoryTotals,
    ranking: &Ranking,
) {
    let count = totals.len();
    let values = radii(totals, catalog.max_category_total());
    let inner_width = area.width.saturating_sub(2).max(1) as f64;
    // canvas units per terminal cell, used to center labels
    let unit = 2.0 * BOUND / inner_width;

    let labels: Vec<(usize, Line<'static>)> = totals
        .entries()
        .iter()
        .enumerate()
        .filter_map(|(i, (category, _))| {
            let info = catalog.info(*category)?;
            let style = theme::label(ranking.emphasis(*category));
            Some((i, Line::from(Span::styled(info.short_name(), style))))
        })
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-BOUND, BOUND])
        .y_bounds([-BOUND, BOUND])
        .paint(move |ctx| {
            draw_grid(ctx, count);
            ctx.layer();
            draw_polygon(ctx, &values);
            ctx.layer();
            for (i, line) in &labels {
                let (x, y) = axis_point(*i, count, LABEL_RADIUS);
                ctx.print(label_start(x, line.width(), unit), y, line.clone());
            }
        });

    frame.render_widget(canvas, area);
}

/// Left edge for a label centered on `x`, kept inside the canvas bounds.
/// The canvas drops labels that start outside them.
fn label_start(x: f64, width: usize, unit: f64) -> f64 {
    let span = width as f64 * unit;
    (x - span / 2.0).min(BOUND - span).max(-BOUND)
}

fn draw_grid(ctx: &mut Context<'_>, count: usize) {
    if count < 2 {
        return;
    }
    for ring in GRID_RINGS {
        for i in 0..count {
            let (x1, y1) = axis_point(i, count, ring);
            let (x2, y2) = axis_point((i + 1) % count, count, ring);
            ctx.draw(&Segment {
                x1,
                y1,
                x2,
                y2,
                color: Color::DarkGray,
            });
        }
    }
    for i in 0..count {
        let (x2, y2) = axis_point(i, count, 1.0);
        ctx.draw(&Segment {
            x1: 0.0,
            y1: 0.0,
            x2,
            y2,
            color: Color::DarkGray,
        });
    }
}

fn draw_polygon(ctx: &mut Context<'_>, values: &[f64]) {
    let count = values.len();
    if count < 2 {
        return;
    }
    for i in 0..count {
        let j = (i + 1) % count;
        let (x1, y1) = axis_point(i, count, values[i]);
        let (x2, y2) = axis_point(j, count, values[j]);
        ctx.draw(&Segment {
            x1,
            y1,
            x2,
            y2,
            color: theme::INDIGO_LIGHT,
        });
    }
}
