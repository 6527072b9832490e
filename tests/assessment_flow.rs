use async_trait::async_trait;
use leader_power::catalog::{Catalog, CategoryInfo, POINTS_PER_QUESTION, PowerCategory, QuestionPair};
use leader_power::clients::{GenerationParams, ModelError, ReportModel};
use leader_power::ranking::{Emphasis, Ranking};
use leader_power::report::{ReportOutcome, request_report};
use leader_power::scoring::{ScoreState, category_totals};
use leader_power::session::{Phase, Session};

fn info(category: PowerCategory, name: &'static str) -> CategoryInfo {
    CategoryInfo {
        category,
        name,
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

#[test]
fn all_a_answers_pile_onto_statement_a_categories() {
    let catalog = Catalog::builtin();
    let mut scores = ScoreState::new(catalog);
    for q in catalog.questions() {
        scores.choose_a(q.id).unwrap();
    }
    let totals = category_totals(&scores, catalog);

    for info in catalog.categories() {
        let as_a = catalog
            .questions()
            .iter()
            .filter(|q| q.cat_a == info.category)
            .count() as u32;
        assert_eq!(totals.get(info.category), as_a * POINTS_PER_QUESTION as u32);
    }
    assert_eq!(totals.sum(), 3 * catalog.len() as u32);
}

#[test]
fn full_points_to_a_single_statement_a_category() {
    let categories = vec![
        info(PowerCategory::A, "X"),
        info(PowerCategory::B, "B"),
        info(PowerCategory::C, "C"),
        info(PowerCategory::D, "D"),
    ];
    let opponents = [
        PowerCategory::B,
        PowerCategory::C,
        PowerCategory::D,
        PowerCategory::B,
        PowerCategory::C,
    ];
    let questions = opponents
        .iter()
        .enumerate()
        .map(|(i, b)| pair(i as u32 + 1, PowerCategory::A, *b))
        .collect();
    let catalog = Catalog::new(categories, questions).unwrap();

    let mut scores = ScoreState::new(&catalog);
    for q in catalog.questions() {
        scores.set_answer(q.id, 3).unwrap();
    }
    let totals = category_totals(&scores, &catalog);

    let appearances = catalog.appearances(PowerCategory::A) as u32;
    assert_eq!(appearances, 5);
    assert_eq!(totals.get(PowerCategory::A), 3 * appearances);
    for other in [PowerCategory::B, PowerCategory::C, PowerCategory::D] {
        assert_eq!(totals.get(other), 0);
    }
    assert_eq!(Ranking::new(&totals).top_power(), Some((PowerCategory::A, 15)));
}

#[test]
fn sum_stays_fixed_through_arbitrary_edits() {
    let catalog = Catalog::builtin();
    let mut scores = ScoreState::new(catalog);
    for (i, q) in catalog.questions().iter().enumerate() {
        scores.set_answer(q.id, (i as i32 % 7) - 2).unwrap();
        if i % 3 == 0 {
            scores.nudge_toward_b(q.id).unwrap();
        }
    }
    assert_eq!(category_totals(&scores, catalog).sum(), 63);
}

#[test]
fn small_catalog_ranks_and_highlights() {
    let catalog = Catalog::new(
        vec![
            info(PowerCategory::A, "A"),
            info(PowerCategory::B, "B"),
            info(PowerCategory::C, "C"),
            info(PowerCategory::D, "D"),
        ],
        vec![
            pair(1, PowerCategory::A, PowerCategory::B),
            pair(2, PowerCategory::C, PowerCategory::D),
            pair(3, PowerCategory::A, PowerCategory::D),
        ],
    )
    .unwrap();
    let mut scores = ScoreState::new(&catalog);
    scores.set_answer(1, 3).unwrap();
    scores.set_answer(2, 1).unwrap();
    scores.set_answer(3, 2).unwrap();

    let totals = category_totals(&scores, &catalog);
    assert_eq!(
        totals.entries(),
        &[
            (PowerCategory::A, 5),
            (PowerCategory::B, 0),
            (PowerCategory::C, 1),
            (PowerCategory::D, 3),
        ]
    );

    let ranking = Ranking::new(&totals);
    assert_eq!(ranking.top_power(), Some((PowerCategory::A, 5)));
    // with four categories C sits in both sets; top wins
    assert_eq!(ranking.emphasis(PowerCategory::C), Emphasis::Top);
    assert_eq!(ranking.emphasis(PowerCategory::B), Emphasis::Bottom);
}

struct Echo;

#[async_trait]
impl ReportModel for Echo {
    async fn generate(&self, prompt: &str, _params: &GenerationParams) -> Result<String, ModelError> {
        Ok(format!("# 결과\n{}", prompt.lines().nth(1).unwrap_or_default()))
    }
}

struct Down;

#[async_trait]
impl ReportModel for Down {
    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String, ModelError> {
        Err(ModelError::Status {
            status: 503,
            body: "overloaded".into(),
        })
    }
}

#[tokio::test]
async fn finished_session_stores_the_generated_report() {
    let mut session = Session::new(Catalog::builtin(), true);
    assert!(session.start());
    session.set_answer(1, 3).unwrap();
    let ticket = session.finish().expect("report enabled");

    let outcome = request_report(&Echo, &session.prompt(), &GenerationParams::default()).await;
    assert!(session.complete_report(ticket, outcome));
    assert_eq!(session.phase(), Phase::Result);
    assert!(session.report().text().starts_with("# 결과"));
    assert!(session.report().text().contains("강압적 권력 (Coercive): 11점"));
}

#[tokio::test]
async fn superseded_request_cannot_overwrite_newer_report() {
    let mut session = Session::new(Catalog::builtin(), true);
    session.start();
    let first = session.finish().unwrap();
    let failed = request_report(&Down, &session.prompt(), &GenerationParams::default()).await;
    assert_eq!(failed, ReportOutcome::Unavailable);
    assert!(session.complete_report(first, failed));

    let second = session.regenerate().unwrap();
    // a late copy of the first response arrives while the second is in flight
    assert!(!session.complete_report(first, ReportOutcome::Generated("old".into())));
    assert!(session.report().is_analyzing());

    let fresh = request_report(&Echo, &session.prompt(), &GenerationParams::default()).await;
    assert!(session.complete_report(second, fresh));
    assert!(session.report().text().starts_with("# 결과"));
}
