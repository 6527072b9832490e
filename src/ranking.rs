//! Ranking of category totals for chart emphasis.

use serde::Serialize;

use crate::catalog::PowerCategory;
use crate::scoring::CategoryTotals;

const HIGHLIGHT_COUNT: usize = 3;

/// Label emphasis on the result chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Emphasis {
    Top,
    Bottom,
    Normal,
}

/// Categories ordered by total, highest first. Ties keep catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    ordered: Vec<(PowerCategory, u32)>,
}

impl Ranking {
    pub fn new(totals: &CategoryTotals) -> Self {
        let mut ordered = totals.entries().to_vec();
        // sort_by is stable
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        Self { ordered }
    }

    pub fn ordered(&self) -> &[(PowerCategory, u32)] {
        &self.ordered
    }

    pub fn top_power(&self) -> Option<(PowerCategory, u32)> {
        self.ordered.first().copied()
    }

    pub fn top3(&self) -> &[(PowerCategory, u32)] {
        &self.ordered[..self.ordered.len().min(HIGHLIGHT_COUNT)]
    }

    pub fn bottom3(&self) -> &[(PowerCategory, u32)] {
        let start = self.ordered.len().saturating_sub(HIGHLIGHT_COUNT);
        &self.ordered[start..]
    }

    pub fn emphasis(&self, category: PowerCategory) -> Emphasis {
        if self.top3().iter().any(|(c, _)| *c == category) {
            Emphasis::Top
        } else if self.bottom3().iter().any(|(c, _)| *c == category) {
            Emphasis::Bottom
        } else {
            Emphasis::Normal
        }
    }
}
