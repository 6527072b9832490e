//! One run through the assessment: phase, answers, and the report request.

use crate::catalog::{Catalog, QuestionPair};
use crate::error::{PowerError, Result};
use crate::ranking::Ranking;
use crate::report::{ReportOutcome, ReportTicket, ReportTracker, build_prompt};
use crate::scoring::{CategoryTotals, ScoreSplit, ScoreState, category_totals};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Survey { cursor: usize },
    Result,
}

#[derive(Debug)]
pub struct Session<'c> {
    catalog: &'c Catalog,
    phase: Phase,
    scores: ScoreState,
    report: ReportTracker,
    report_enabled: bool,
}

impl<'c> Session<'c> {
    pub fn new(catalog: &'c Catalog, report_enabled: bool) -> Self {
        Self {
            catalog,
            phase: Phase::Intro,
            scores: ScoreState::new(catalog),
            report: ReportTracker::new(),
            report_enabled,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scores(&self) -> &ScoreState {
        &self.scores
    }

    pub fn report(&self) -> &ReportTracker {
        &self.report
    }

    pub fn report_enabled(&self) -> bool {
        self.report_enabled
    }

    pub fn totals(&self) -> CategoryTotals {
        category_totals(&self.scores, self.catalog)
    }

    pub fn ranking(&self) -> Ranking {
        Ranking::new(&self.totals())
    }

    pub fn prompt(&self) -> String {
        build_prompt(&self.totals(), self.catalog)
    }

    /// Intro -> Survey. Returns false from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Intro || self.catalog.is_empty() {
            return false;
        }
        self.phase = Phase::Survey { cursor: 0 };
        true
    }

    pub fn current_question(&self) -> Option<&'c QuestionPair> {
        match self.phase {
            Phase::Survey { cursor } => self.catalog.questions().get(cursor),
            _ => None,
        }
    }

    pub fn current_split(&self) -> Option<ScoreSplit> {
        self.current_question().and_then(|q| self.scores.get(q.id))
    }

    pub fn is_last_question(&self) -> bool {
        matches!(self.phase, Phase::Survey { cursor } if cursor + 1 >= self.catalog.len())
    }

    pub fn next_question(&mut self) {
        if let Phase::Survey { cursor } = self.phase {
            let last = self.catalog.len().saturating_sub(1);
            self.phase = Phase::Survey {
                cursor: (cursor + 1).min(last),
            };
        }
    }

    pub fn prev_question(&mut self) {
        if let Phase::Survey { cursor } = self.phase {
            self.phase = Phase::Survey {
                cursor: cursor.saturating_sub(1),
            };
        }
    }

    /// Set the answer for any question while the survey is open.
    pub fn set_answer(&mut self, question_id: u32, score_a: i32) -> Result<ScoreSplit> {
        self.ensure_survey()?;
        self.scores.set_answer(question_id, score_a)
    }

    pub fn nudge_current_toward_a(&mut self) -> Result<ScoreSplit> {
        let id = self.current_id()?;
        self.scores.nudge_toward_a(id)
    }

    pub fn nudge_current_toward_b(&mut self) -> Result<ScoreSplit> {
        let id = self.current_id()?;
        self.scores.nudge_toward_b(id)
    }

    pub fn choose_current_a(&mut self) -> Result<ScoreSplit> {
        let id = self.current_id()?;
        self.scores.choose_a(id)
    }

    pub fn choose_current_b(&mut self) -> Result<ScoreSplit> {
        let id = self.current_id()?;
        self.scores.choose_b(id)
    }

    /// Survey -> Result. Returns a ticket when a report request should be sent.
    pub fn finish(&mut self) -> Option<ReportTicket> {
        if !matches!(self.phase, Phase::Survey { .. }) {
            return None;
        }
        self.phase = Phase::Result;
        tracing::info!(
            top = ?self.ranking().top_power(),
            "survey finished"
        );
        self.begin_report()
    }

    /// Manual re-request; ignored while a request is in flight.
    pub fn regenerate(&mut self) -> Option<ReportTicket> {
        if self.phase != Phase::Result || self.report.is_analyzing() {
            return None;
        }
        self.begin_report()
    }

    pub fn complete_report(&mut self, ticket: ReportTicket, outcome: ReportOutcome) -> bool {
        self.report.complete(ticket, outcome)
    }

    /// Back to the intro with fresh answers.
    pub fn restart(&mut self) {
        self.phase = Phase::Intro;
        self.scores = ScoreState::new(self.catalog);
        self.report.reset();
    }

    fn begin_report(&mut self) -> Option<ReportTicket> {
        if !self.report_enabled {
            return None;
        }
        Some(self.report.begin())
    }

    fn ensure_survey(&self) -> Result<()> {
        if matches!(self.phase, Phase::Survey { .. }) {
            Ok(())
        } else {
            Err(PowerError::InvalidParams {
                message: format!("answers can only change during the survey (phase {:?})", self.phase),
            })
        }
    }

    fn current_id(&self) -> Result<u32> {
        self.current_question()
            .map(|q| q.id)
            .ok_or_else(|| PowerError::InvalidParams {
                message: "no question is active".to_string(),
            })
    }
}
