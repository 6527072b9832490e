//! Answer state and the per-category score aggregator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{Catalog, POINTS_PER_QUESTION, PowerCategory};
use crate::error::{PowerError, Result};

/// Points awarded to each side of one question. Always sums to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSplit {
    score_a: u8,
    score_b: u8,
}

impl ScoreSplit {
    /// Default split for an unanswered question.
    pub fn balanced() -> Self {
        Self::from_score_a(1)
    }

    /// Out-of-range values are clamped to `0..=3`.
    pub fn from_score_a(score_a: i32) -> Self {
        let score_a = score_a.clamp(0, POINTS_PER_QUESTION as i32) as u8;
        Self {
            score_a,
            score_b: POINTS_PER_QUESTION - score_a,
        }
    }

    pub fn score_a(&self) -> u8 {
        self.score_a
    }

    pub fn score_b(&self) -> u8 {
        self.score_b
    }

    /// True when statement A currently holds the majority of the points.
    pub fn leans_a(&self) -> bool {
        self.score_a > self.score_b
    }
}

impl Default for ScoreSplit {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Per-question answers for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    splits: BTreeMap<u32, ScoreSplit>,
}

impl ScoreState {
    /// One balanced entry per catalog question.
    pub fn new(catalog: &Catalog) -> Self {
        let splits = catalog
            .questions()
            .iter()
            .map(|q| (q.id, ScoreSplit::balanced()))
            .collect();
        Self { splits }
    }

    pub fn get(&self, question_id: u32) -> Option<ScoreSplit> {
        self.splits.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.splits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, ScoreSplit)> + '_ {
        self.splits.iter().map(|(id, split)| (*id, *split))
    }

    /// Set the points for statement A; statement B receives the remainder.
    ///
    /// `score_a` is clamped to `0..=3`. Ids that were not part of the catalog
    /// the state was created from are rejected.
    pub fn set_answer(&mut self, question_id: u32, score_a: i32) -> Result<ScoreSplit> {
        let slot = self
            .splits
            .get_mut(&question_id)
            .ok_or_else(|| PowerError::InvalidParams {
                message: format!("no question with id {}", question_id),
            })?;
        if !(0..=POINTS_PER_QUESTION as i32).contains(&score_a) {
            tracing::debug!(
                "clamping score {} for question {} into 0..=3",
                score_a,
                question_id
            );
        }
        *slot = ScoreSplit::from_score_a(score_a);
        Ok(*slot)
    }

    /// Move one point toward statement A.
    pub fn nudge_toward_a(&mut self, question_id: u32) -> Result<ScoreSplit> {
        let current = self.current(question_id)?;
        self.set_answer(question_id, current.score_a as i32 + 1)
    }

    /// Move one point toward statement B.
    pub fn nudge_toward_b(&mut self, question_id: u32) -> Result<ScoreSplit> {
        let current = self.current(question_id)?;
        self.set_answer(question_id, current.score_a as i32 - 1)
    }

    pub fn choose_a(&mut self, question_id: u32) -> Result<ScoreSplit> {
        self.set_answer(question_id, POINTS_PER_QUESTION as i32)
    }

    pub fn choose_b(&mut self, question_id: u32) -> Result<ScoreSplit> {
        self.set_answer(question_id, 0)
    }

    fn current(&self, question_id: u32) -> Result<ScoreSplit> {
        self.get(question_id).ok_or_else(|| PowerError::InvalidParams {
            message: format!("no question with id {}", question_id),
        })
    }
}

/// Category totals in catalog category order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    entries: Vec<(PowerCategory, u32)>,
}

impl CategoryTotals {
    pub fn from_entries(entries: Vec<(PowerCategory, u32)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, category: PowerCategory) -> u32 {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, total)| *total)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[(PowerCategory, u32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> u32 {
        self.entries.iter().map(|(_, total)| total).sum()
    }
}

/// Reduce per-question splits into per-category totals.
///
/// Every catalog category starts at zero; each question adds `score_a` to
/// `cat_a` and `score_b` to `cat_b`.
pub fn category_totals(scores: &ScoreState, catalog: &Catalog) -> CategoryTotals {
    let mut entries: Vec<(PowerCategory, u32)> = catalog
        .categories()
        .iter()
        .map(|info| (info.category, 0))
        .collect();

    for q in catalog.questions() {
        let split = scores.get(q.id);
        debug_assert!(split.is_some(), "score state has no entry for question {}", q.id);
        let Some(split) = split else {
            tracing::warn!("score state has no entry for question {}, skipping", q.id);
            continue;
        };
        add(&mut entries, q.cat_a, split.score_a());
        add(&mut entries, q.cat_b, split.score_b());
    }

    CategoryTotals { entries }
}

fn add(entries: &mut [(PowerCategory, u32)], category: PowerCategory, points: u8) {
    if let Some((_, total)) = entries.iter_mut().find(|(c, _)| *c == category) {
        *total += points as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryInfo, QuestionPair};

    fn info(category: PowerCategory) -> CategoryInfo {
        CategoryInfo {
            category,
            name: "test",
            description: "",
            color: "#000000",
        }
    }

    fn pair(id: u32, cat_a: PowerCategory, cat_b: PowerCategory) -> QuestionPair {
        QuestionPair {
            id,
            text_a: "a",
            cat_a,
            text_b: "b",
            cat_b,
        }
    }

    fn small_catalog() -> Catalog {
        use PowerCategory::*;
        Catalog::new(
            vec![info(A), info(B), info(C), info(D), info(E)],
            vec![pair(1, A, B), pair(2, C, D)],
        )
        .unwrap()
    }

    #[test]
    fn test_sum_invariant_holds_for_every_valid_input() {
        let catalog = Catalog::builtin();
        let mut state = ScoreState::new(catalog);
        for q in catalog.questions() {
            for value in 0..=3 {
                let split = state.set_answer(q.id, value).unwrap();
                assert_eq!(split.score_a() as i32, value);
                assert_eq!(split.score_a() + split.score_b(), 3);
            }
        }
        for (_, split) in state.iter() {
            assert_eq!(split.score_a() + split.score_b(), 3);
        }
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut state = ScoreState::new(&small_catalog());
        let high = state.set_answer(1, 7).unwrap();
        assert_eq!((high.score_a(), high.score_b()), (3, 0));
        let low = state.set_answer(1, -2).unwrap();
        assert_eq!((low.score_a(), low.score_b()), (0, 3));
    }

    #[test]
    fn test_unknown_question_is_rejected() {
        let mut state = ScoreState::new(&small_catalog());
        let err = state.set_answer(99, 2).unwrap_err();
        assert!(matches!(err, PowerError::InvalidParams { .. }));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_new_state_is_balanced() {
        let state = ScoreState::new(Catalog::builtin());
        assert_eq!(state.len(), 21);
        assert!(
            state
                .iter()
                .all(|(_, s)| s.score_a() == 1 && s.score_b() == 2)
        );
    }

    #[test]
    fn test_nudges_saturate() {
        let mut state = ScoreState::new(&small_catalog());
        for _ in 0..5 {
            state.nudge_toward_a(1).unwrap();
        }
        assert_eq!(state.get(1).unwrap().score_a(), 3);
        for _ in 0..5 {
            state.nudge_toward_b(1).unwrap();
        }
        assert_eq!(state.get(1).unwrap().score_a(), 0);
    }

    #[test]
    fn test_small_catalog_totals() {
        use PowerCategory::*;
        let catalog = small_catalog();
        let mut state = ScoreState::new(&catalog);
        state.set_answer(1, 3).unwrap();
        state.set_answer(2, 2).unwrap();

        let totals = category_totals(&state, &catalog);
        assert_eq!(totals.get(A), 3);
        assert_eq!(totals.get(B), 0);
        assert_eq!(totals.get(C), 2);
        assert_eq!(totals.get(D), 1);
        // E is defined but never asked about
        assert_eq!(totals.get(E), 0);
        assert_eq!(totals.len(), 5);
        assert_eq!(totals.sum(), 6);
    }

    #[test]
    fn test_totals_follow_category_order() {
        let totals = category_totals(
            &ScoreState::new(Catalog::builtin()),
            Catalog::builtin(),
        );
        let order: Vec<PowerCategory> = totals.entries().iter().map(|(c, _)| *c).collect();
        assert_eq!(order, PowerCategory::ALL.to_vec());
        assert_eq!(totals.sum(), 21 * 3);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let catalog = Catalog::builtin();
        let mut state = ScoreState::new(catalog);
        state.choose_a(4).unwrap();
        state.choose_b(9).unwrap();
        let first = category_totals(&state, catalog);
        let second = category_totals(&state, catalog);
        assert_eq!(first, second);
    }
}
