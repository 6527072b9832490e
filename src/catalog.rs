//! Question and power-source catalog.
//!
//! The built-in catalog holds the seven French & Raven power bases (plus the
//! connection and information extensions) and the 21 forced-choice question
//! pairs. It is process-wide, read-only, and validated on first access.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{PowerError, Result};

/// Points split between the two statements of every question pair.
pub const POINTS_PER_QUESTION: u8 = 3;

/// Power source category code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerCategory {
    /// Coercive
    A,
    /// Connection
    B,
    /// Expert
    C,
    /// Information
    D,
    /// Legitimate
    E,
    /// Referent
    F,
    /// Reward
    G,
}

impl PowerCategory {
    pub const ALL: [PowerCategory; 7] = [
        PowerCategory::A,
        PowerCategory::B,
        PowerCategory::C,
        PowerCategory::D,
        PowerCategory::E,
        PowerCategory::F,
        PowerCategory::G,
    ];

    pub fn code(self) -> char {
        match self {
            PowerCategory::A => 'A',
            PowerCategory::B => 'B',
            PowerCategory::C => 'C',
            PowerCategory::D => 'D',
            PowerCategory::E => 'E',
            PowerCategory::F => 'F',
            PowerCategory::G => 'G',
        }
    }
}

impl fmt::Display for PowerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Display metadata for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub category: PowerCategory,
    pub name: &'static str,
    pub description: &'static str,
    /// `#RRGGBB`
    pub color: &'static str,
}

impl CategoryInfo {
    /// Name without the parenthesised English gloss, used as the chart label.
    pub fn short_name(&self) -> &'static str {
        self.name.split(" (").next().unwrap_or(self.name)
    }

    /// First word of the name, shown under survey statements.
    pub fn first_word(&self) -> &'static str {
        self.name.split(' ').next().unwrap_or(self.name)
    }

    /// Parse the hex display color into RGB components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

/// A forced-tradeoff item splitting points between two opposing categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPair {
    pub id: u32,
    pub text_a: &'static str,
    pub cat_a: PowerCategory,
    pub text_b: &'static str,
    pub cat_b: PowerCategory,
}

impl QuestionPair {
    pub fn references(&self, category: PowerCategory) -> bool {
        self.cat_a == category || self.cat_b == category
    }
}

/// Validated, immutable set of categories and questions
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<CategoryInfo>,
    questions: Vec<QuestionPair>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids, self-opposed pairs, and
    /// questions that reference a category missing from `categories`.
    pub fn new(categories: Vec<CategoryInfo>, questions: Vec<QuestionPair>) -> Result<Self> {
        let mut seen_categories = HashSet::new();
        for info in &categories {
            if !seen_categories.insert(info.category) {
                return Err(PowerError::Validation {
                    message: format!("category {} defined more than once", info.category),
                });
            }
        }

        let mut seen_ids = HashSet::new();
        for q in &questions {
            if !seen_ids.insert(q.id) {
                return Err(PowerError::Validation {
                    message: format!("question id {} defined more than once", q.id),
                });
            }
            if q.cat_a == q.cat_b {
                return Err(PowerError::Validation {
                    message: format!(
                        "question {} pits category {} against itself",
                        q.id, q.cat_a
                    ),
                });
            }
            for cat in [q.cat_a, q.cat_b] {
                if !seen_categories.contains(&cat) {
                    return Err(PowerError::Validation {
                        message: format!("question {} references unknown category {}", q.id, cat),
                    });
                }
            }
        }

        Ok(Self {
            categories,
            questions,
        })
    }

    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    pub fn questions(&self) -> &[QuestionPair] {
        &self.questions
    }

    pub fn info(&self, category: PowerCategory) -> Option<&CategoryInfo> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions in which `category` appears on either side.
    pub fn appearances(&self, category: PowerCategory) -> usize {
        self.questions
            .iter()
            .filter(|q| q.references(category))
            .count()
    }

    /// Largest total any single category can reach; used as the chart scale.
    pub fn max_category_total(&self) -> u32 {
        self.categories
            .iter()
            .map(|c| self.appearances(c.category) as u32 * POINTS_PER_QUESTION as u32)
            .max()
            .unwrap_or(0)
    }
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(power_bases(), survey_questions()).expect("built-in catalog should be valid")
});

fn power_bases() -> Vec<CategoryInfo> {
    use PowerCategory::*;
    vec![
        CategoryInfo {
            category: A,
            name: "강압적 권력 (Coercive)",
            description: "제재, 징벌, 불이익을 줄 수 있는 권한에 기반합니다.",
            color: "#EF4444",
        },
        CategoryInfo {
            category: B,
            name: "연계적 권력 (Connection)",
            description: "조직 내 실력자들과의 긴밀한 관계나 인맥에 기반합니다.",
            color: "#F59E0B",
        },
        CategoryInfo {
            category: C,
            name: "전문적 권력 (Expert)",
            description: "나의 지식, 능력, 경험 및 정확한 판단력에 기반합니다.",
            color: "#10B981",
        },
        CategoryInfo {
            category: D,
            name: "정보적 권력 (Information)",
            description: "가치 있는 정보나 데이터의 소유 및 통로 확보에 기반합니다.",
            color: "#3B82F6",
        },
        CategoryInfo {
            category: E,
            name: "합법적 권력 (Legitimate)",
            description: "조직에서 부여한 공식적인 직위와 권한에 기반합니다.",
            color: "#8B5CF6",
        },
        CategoryInfo {
            category: F,
            name: "준거적 권력 (Referent)",
            description: "후배들의 개인적 호의와 나를 닮고 싶어하는 마음(롤모델)에 기반합니다.",
            color: "#EC4899",
        },
        CategoryInfo {
            category: G,
            name: "보상적 권력 (Reward)",
            description: "보수를 주거나 칭찬, 지지 등 혜택을 줄 수 있는 권한에 기반합니다.",
            color: "#06B6D4",
        },
    ]
}

fn survey_questions() -> Vec<QuestionPair> {
    use PowerCategory::*;
    let q = |id, cat_a, text_a, cat_b, text_b| QuestionPair {
        id,
        text_a,
        cat_a,
        text_b,
        cat_b,
    };
    vec![
        q(1, A, "나에게 협력하지 않는 사람들에게 제재나 징벌을 행사할 수 있다.", B, "내가 영향력 있는 실력자들과 연줄이 있음을 후배들이 알고 있다."),
        q(2, C, "나의 지식, 능력, 판단력 등을 인정받고 경의를 받고 있다.", D, "후배들에게 가치 있는 정보나 데이터를 제공할 수 있는 위치에 있다."),
        q(3, E, "조직상 나의 직위가 후배들을 지휘 명령할 권한을 부여했다.", F, "후배들이 나에게 개인적 호의를 갖고 있어 내 뜻에 맞게 행동한다."),
        q(4, G, "협력하는 사람들에게 보수를 주거나 지지해 줄 수 있다.", A, "협력하지 않는 사람들에게 불이익을 줄 수 있는 권한이 있다."),
        q(5, B, "실력자들과의 관계가 돈독하여 그들로부터 지원을 받을 수 있다.", C, "나의 뛰어난 전문 지식과 경험을 후배들이 신뢰한다."),
        q(6, D, "필요한 정보를 손에 넣는 통로를 정확히 알고 있다.", E, "상사로서 합법적으로 업무를 지시할 자격이 있다."),
        q(7, F, "후배들이 나를 인간적으로 좋아하고 따르고 싶어한다.", G, "후배들이 원하는 보상이나 혜택을 제공할 수 있다."),
        q(8, B, "높은 분들과 친분이 두터워 영향력을 행사할 수 있다.", F, "후배들이 나를 역할 모델로 삼고 나처럼 되기를 원한다."),
        q(9, C, "내 분야에서 누구보다 앞선 전문성을 갖추고 있다.", A, "지시를 어길 경우 인사상의 조치를 취할 수 있다."),
        q(10, D, "업무에 꼭 필요한 핵심 데이터를 독점적으로 알고 있다.", E, "직위 자체만으로도 후배들이 지시를 따를 의무를 느낀다."),
        q(11, A, "벌칙이나 경고를 통해 후배들을 통제할 수 있다.", B, "중요한 인맥을 통해 후배들의 문제를 해결해 줄 수 있다."),
        q(12, E, "공식적인 명령 체계상 내가 결정권을 가지고 있다.", B, "상위 리더들과 대화가 잘 통하며 영향력을 공유한다."),
        q(13, F, "나의 인격과 인간미에 매료되어 후배들이 협조한다.", C, "해결하기 어려운 문제에 대해 명쾌한 해답을 줄 수 있다."),
        q(14, G, "인센티브나 칭찬 등 긍정적 보상을 줄 수 있다.", B, "배후에 든든한 조력자들이 있음을 은연중에 보여준다."),
        q(15, A, "엄격한 규율과 통제를 통해 후배들이 따르게 한다.", E, "회사가 나에게 부여한 정당한 관리 권한이 있다."),
        q(16, B, "네트워크 파워를 통해 필요한 자원을 끌어올 수 있다.", F, "후배들과 정서적 유대감이 깊고 친밀한 관계를 맺고 있다."),
        q(17, C, "전문가로서의 카리스마와 실력을 갖추고 있다.", G, "성과를 낸 후배에게 유무형의 확실한 보상을 제공한다."),
        q(18, D, "업무 흐름에 결정적인 정보를 가장 먼저 파악한다.", F, "후배들이 나를 존경하며 나의 가치관을 공유하고자 한다."),
        q(19, E, "직무 기술서상 명시된 나의 권한을 행사한다.", G, "후배들이 성취감을 느낄 수 있는 기회를 배분해준다."),
        q(20, F, "나와 함께 일하는 것을 후배들이 즐겁게 생각한다.", A, "나의 비협조는 후배들에게 큰 압박과 두려움이 된다."),
        q(21, G, "승진이나 평가 등 실질적인 보상 권한을 가졌다.", D, "조직 내 돌아가는 사정을 꿰뚫는 정보력을 가졌다."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 21);
        assert_eq!(catalog.categories().len(), 7);
        for q in catalog.questions() {
            assert_ne!(q.cat_a, q.cat_b, "question {} is self-opposed", q.id);
        }
    }

    #[test]
    fn test_builtin_catalog_revalidates() {
        assert!(Catalog::new(power_bases(), survey_questions()).is_ok());
    }

    #[test]
    fn test_builtin_appearance_counts() {
        let catalog = Catalog::builtin();
        let counts: Vec<usize> = PowerCategory::ALL
            .iter()
            .map(|c| catalog.appearances(*c))
            .collect();
        assert_eq!(counts, vec![6, 7, 5, 5, 6, 7, 6]);
        assert_eq!(counts.iter().sum::<usize>(), 42);
        assert_eq!(catalog.max_category_total(), 21);
    }

    #[test]
    fn test_rejects_self_opposed_pair() {
        let bad = vec![QuestionPair {
            id: 1,
            text_a: "a",
            cat_a: PowerCategory::C,
            text_b: "b",
            cat_b: PowerCategory::C,
        }];
        let err = Catalog::new(power_bases(), bad).unwrap_err();
        assert!(err.to_string().contains("against itself"));
    }

    #[test]
    fn test_rejects_duplicate_question_id() {
        let mut questions = survey_questions();
        questions[1].id = questions[0].id;
        assert!(Catalog::new(power_bases(), questions).is_err());
    }

    #[test]
    fn test_rejects_unknown_category() {
        let categories = power_bases().into_iter().take(2).collect();
        let questions = vec![survey_questions()[1].clone()];
        let err = Catalog::new(categories, questions).unwrap_err();
        assert!(err.to_string().contains("unknown category"));
    }

    #[test]
    fn test_name_helpers() {
        let info = Catalog::builtin().info(PowerCategory::C).unwrap();
        assert_eq!(info.short_name(), "전문적 권력");
        assert_eq!(info.first_word(), "전문적");
        assert_eq!(info.rgb(), Some((0x10, 0xB9, 0x81)));
    }

    #[test]
    fn test_rgb_rejects_malformed_color() {
        let info = CategoryInfo {
            category: PowerCategory::A,
            name: "x",
            description: "",
            color: "red",
        };
        assert_eq!(info.rgb(), None);
    }
}
