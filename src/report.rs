//! Coaching report: prompt construction, the external request, and the
//! request-generation state machine that keeps stale responses out.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::clients::traits::{GenerationParams, ReportModel};
use crate::scoring::CategoryTotals;

/// Stored when the service answers with no text.
pub const EMPTY_REPORT_TEXT: &str = "분석 결과를 생성할 수 없습니다.";

/// Stored when the request fails for any reason.
pub const UNAVAILABLE_REPORT_TEXT: &str = "현재 AI 분석 서비스가 일시적으로 지연되고 있습니다. 결과 상단의 점수와 차트를 중심으로 자신의 리더십 스타일을 먼저 확인해 주세요.";

/// `"{name}: {score}점"` for every category, in catalog order.
pub fn score_summary(totals: &CategoryTotals, catalog: &Catalog) -> String {
    totals
        .entries()
        .iter()
        .map(|(category, score)| {
            let name = catalog
                .info(*category)
                .map(|info| info.name.to_string())
                .unwrap_or_else(|| category.to_string());
            format!("{}: {}점", name, score)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_prompt(totals: &CategoryTotals, catalog: &Catalog) -> String {
    let summary = score_summary(totals, catalog);
    format!(
        "당신은 리더의 강점과 약점을 파악하여 실용적인 개발 전략을 제시하는 '리더십 실천 가이드'입니다.
사용자의 리더십 파워 진단 결과는 다음과 같습니다: [ {summary} ]

위 데이터를 바탕으로 다음 3가지 핵심 내용을 A4 1장 분량으로 간결하게 작성해주세요:

1.  **강점 파악 및 활용**: 가장 높은 점수를 얻은 파워 유형은 무엇이며, 업무 현장에서 이를 어떻게 효과적으로 무기로 활용할 수 있을까요? 구체적인 팁을 포함해주세요.
2.  **약점 분석 및 보완**: 상대적으로 낮은 점수를 기록한 파워 유형은 무엇이며, 이것이 리더십에 미칠 수 있는 잠재적 위험은 무엇인가요? 이를 상쇄하거나 보완하기 위한 실용적인 전략을 제시해주세요.
3.  **실전 개발 로드맵**: 영향력을 더욱 증진시키기 위해 당장 내일부터 시작할 수 있는 구체적인 행동 지침 3가지를 단계별로 제시해주세요.

서술형보다는 핵심 요약 중심(Bullet points 또는 짧은 문단)으로, 전문적이면서도 명쾌하고 실천 의지를 고취시키는 어조로 작성해주세요. Markdown 형식을 사용하여 제목, 리스트, 강조 등을 적절히 활용하여 가독성을 극대화하세요."
    )
}

/// How a finished request resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReportOutcome {
    Generated(String),
    Empty,
    Unavailable,
}

impl ReportOutcome {
    /// Text shown to the user. Never empty, never an error message.
    pub fn text(&self) -> &str {
        match self {
            ReportOutcome::Generated(text) => text,
            ReportOutcome::Empty => EMPTY_REPORT_TEXT,
            ReportOutcome::Unavailable => UNAVAILABLE_REPORT_TEXT,
        }
    }
}

/// Send `prompt` to `model`; every failure is absorbed into an outcome.
pub async fn request_report<M>(model: &M, prompt: &str, params: &GenerationParams) -> ReportOutcome
where
    M: ReportModel + ?Sized,
{
    match model.generate(prompt, params).await {
        Ok(text) if text.trim().is_empty() => {
            tracing::warn!(model = %params.model, "report service returned no text");
            ReportOutcome::Empty
        }
        Ok(text) => {
            tracing::info!(
                model = %params.model,
                chars = text.chars().count(),
                "report generated"
            );
            ReportOutcome::Generated(text)
        }
        Err(e) => {
            tracing::error!(model = %params.model, "report generation failed: {}", e);
            ReportOutcome::Unavailable
        }
    }
}

/// Handle for one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTicket {
    generation: u64,
}

impl ReportTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportState {
    Idle,
    Requesting { generation: u64 },
    Ready(ReportOutcome),
}

/// Tracks the latest report request. Only the newest ticket may complete.
#[derive(Debug)]
pub struct ReportTracker {
    latest: u64,
    state: ReportState,
}

impl Default for ReportTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTracker {
    pub fn new() -> Self {
        Self {
            latest: 0,
            state: ReportState::Idle,
        }
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, ReportState::Requesting { .. })
    }

    /// Report text, empty until a request completes.
    pub fn text(&self) -> &str {
        match &self.state {
            ReportState::Ready(outcome) => outcome.text(),
            _ => "",
        }
    }

    /// Start a request, superseding any that is still in flight.
    pub fn begin(&mut self) -> ReportTicket {
        self.latest += 1;
        if let ReportState::Requesting { generation } = self.state {
            tracing::debug!(
                "report request {} superseded by {}",
                generation,
                self.latest
            );
        }
        self.state = ReportState::Requesting {
            generation: self.latest,
        };
        ReportTicket {
            generation: self.latest,
        }
    }

    /// Apply a finished request. Returns false when the ticket is stale.
    pub fn complete(&mut self, ticket: ReportTicket, outcome: ReportOutcome) -> bool {
        match self.state {
            ReportState::Requesting { generation } if generation == ticket.generation => {
                self.state = ReportState::Ready(outcome);
                true
            }
            _ => {
                tracing::debug!(
                    "dropping stale report response for request {} (latest {})",
                    ticket.generation,
                    self.latest
                );
                false
            }
        }
    }

    /// Back to idle; any in-flight ticket becomes stale.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.state = ReportState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PowerCategory;
    use crate::clients::traits::ModelError;
    use crate::scoring::{ScoreState, category_totals};
    use async_trait::async_trait;

    struct Fixed(Result<String, ()>);

    #[async_trait]
    impl ReportModel for Fixed {
        async fn generate(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
        ) -> Result<String, ModelError> {
            self.0
                .clone()
                .map_err(|_| ModelError::Http("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_failure_maps_to_fallback() {
        let outcome = request_report(&Fixed(Err(())), "p", &GenerationParams::default()).await;
        assert_eq!(outcome, ReportOutcome::Unavailable);
        assert_eq!(outcome.text(), UNAVAILABLE_REPORT_TEXT);
    }

    #[tokio::test]
    async fn test_empty_text_maps_to_sentinel() {
        let outcome =
            request_report(&Fixed(Ok("  \n".into())), "p", &GenerationParams::default()).await;
        assert_eq!(outcome.text(), EMPTY_REPORT_TEXT);
    }

    #[tokio::test]
    async fn test_blank_text_maps_to_sentinel() {
        let outcome =
            request_report(&Fixed(Ok(String::new())), "p", &GenerationParams::default()).await;
        assert_eq!(outcome, ReportOutcome::Empty);
        assert_eq!(outcome.text(), EMPTY_REPORT_TEXT);
    }

    #[tokio::test]
    async fn test_success_is_verbatim() {
        let outcome =
            request_report(&Fixed(Ok("## 강점\n".into())), "p", &GenerationParams::default())
                .await;
        assert_eq!(outcome.text(), "## 강점\n");
    }

    #[test]
    fn test_prompt_interpolates_every_category() {
        let catalog = Catalog::builtin();
        let mut scores = ScoreState::new(catalog);
        scores.choose_a(1).unwrap();
        let totals = category_totals(&scores, catalog);
        let prompt = build_prompt(&totals, catalog);
        for info in catalog.categories() {
            let expected = format!("{}: {}점", info.name, totals.get(info.category));
            assert!(prompt.contains(&expected), "missing {expected}");
        }
        assert!(prompt.contains("강압적 권력 (Coercive): 11점"));
    }

    #[test]
    fn test_summary_uses_code_for_unknown_category() {
        let totals = CategoryTotals::from_entries(vec![(PowerCategory::A, 2)]);
        let catalog = Catalog::new(Vec::new(), Vec::new()).unwrap();
        assert_eq!(score_summary(&totals, &catalog), "A: 2점");
    }

    #[test]
    fn test_tracker_lifecycle() {
        let mut tracker = ReportTracker::new();
        assert_eq!(tracker.text(), "");
        let ticket = tracker.begin();
        assert!(tracker.is_analyzing());
        assert_eq!(tracker.text(), "");
        assert!(tracker.complete(ticket, ReportOutcome::Generated("ok".into())));
        assert!(!tracker.is_analyzing());
        assert_eq!(tracker.text(), "ok");
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut tracker = ReportTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(second.generation() > first.generation());

        assert!(tracker.complete(second, ReportOutcome::Generated("new".into())));
        assert!(!tracker.complete(first, ReportOutcome::Generated("old".into())));
        assert_eq!(tracker.text(), "new");
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut tracker = ReportTracker::new();
        let ticket = tracker.begin();
        tracker.reset();
        assert!(!tracker.complete(ticket, ReportOutcome::Unavailable));
        assert_eq!(tracker.state(), &ReportState::Idle);
    }
}
