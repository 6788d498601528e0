use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Matching,
    FillInTheBlank,
    ShortAnswer,
    Essay,
}

impl QuestionType {
    pub const MULTIPLE_CHOICE: &'static str = "multiple-choice";
    pub const TRUE_FALSE: &'static str = "true-false";
    pub const MATCHING: &'static str = "matching";
    pub const FILL_IN_THE_BLANK: &'static str = "fill-in-the-blank";
    pub const SHORT_ANSWER: &'static str = "short-answer";
    pub const ESSAY: &'static str = "essay";

    /// 该题型是否只能人工评分
    pub fn requires_manual_grading(&self) -> bool {
        matches!(self, QuestionType::ShortAnswer | QuestionType::Essay)
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<QuestionType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的题型: '{s}'. 支持的题型: multiple-choice, true-false, matching, fill-in-the-blank, short-answer, essay"
            ))
        })
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QuestionType::MultipleChoice => QuestionType::MULTIPLE_CHOICE,
            QuestionType::TrueFalse => QuestionType::TRUE_FALSE,
            QuestionType::Matching => QuestionType::MATCHING,
            QuestionType::FillInTheBlank => QuestionType::FILL_IN_THE_BLANK,
            QuestionType::ShortAnswer => QuestionType::SHORT_ANSWER,
            QuestionType::Essay => QuestionType::ESSAY,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple-choice" => Ok(QuestionType::MultipleChoice),
            "true-false" => Ok(QuestionType::TrueFalse),
            "matching" => Ok(QuestionType::Matching),
            "fill-in-the-blank" => Ok(QuestionType::FillInTheBlank),
            "short-answer" => Ok(QuestionType::ShortAnswer),
            "essay" => Ok(QuestionType::Essay),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

// 学科主题（生物学）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum QuestionTopic {
    #[serde(rename = "Genetic Engineering")]
    GeneticEngineering,
    Evolution,
    Taxonomy,
    Reproduction,
    #[serde(rename = "Plant Systems")]
    PlantSystems,
    #[serde(rename = "Animal Systems")]
    AnimalSystems,
    Homeostasis,
    #[serde(rename = "Immune System")]
    ImmuneSystem,
    Other,
}

impl QuestionTopic {
    pub fn all() -> &'static [QuestionTopic] {
        &[
            QuestionTopic::GeneticEngineering,
            QuestionTopic::Evolution,
            QuestionTopic::Taxonomy,
            QuestionTopic::Reproduction,
            QuestionTopic::PlantSystems,
            QuestionTopic::AnimalSystems,
            QuestionTopic::Homeostasis,
            QuestionTopic::ImmuneSystem,
            QuestionTopic::Other,
        ]
    }
}

impl<'de> Deserialize<'de> for QuestionTopic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<QuestionTopic>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的主题: '{s}'. 支持的主题: Genetic Engineering, Evolution, Taxonomy, Reproduction, Plant Systems, Animal Systems, Homeostasis, Immune System, Other"
            ))
        })
    }
}

impl std::fmt::Display for QuestionTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QuestionTopic::GeneticEngineering => "Genetic Engineering",
            QuestionTopic::Evolution => "Evolution",
            QuestionTopic::Taxonomy => "Taxonomy",
            QuestionTopic::Reproduction => "Reproduction",
            QuestionTopic::PlantSystems => "Plant Systems",
            QuestionTopic::AnimalSystems => "Animal Systems",
            QuestionTopic::Homeostasis => "Homeostasis",
            QuestionTopic::ImmuneSystem => "Immune System",
            QuestionTopic::Other => "Other",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for QuestionTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Genetic Engineering" => Ok(QuestionTopic::GeneticEngineering),
            "Evolution" => Ok(QuestionTopic::Evolution),
            "Taxonomy" => Ok(QuestionTopic::Taxonomy),
            "Reproduction" => Ok(QuestionTopic::Reproduction),
            "Plant Systems" => Ok(QuestionTopic::PlantSystems),
            "Animal Systems" => Ok(QuestionTopic::AnimalSystems),
            "Homeostasis" => Ok(QuestionTopic::Homeostasis),
            "Immune System" => Ok(QuestionTopic::ImmuneSystem),
            "Other" => Ok(QuestionTopic::Other),
            _ => Err(format!("Invalid question topic: {s}")),
        }
    }
}

// 难度
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(serde::de::Error::custom(format!(
                "无效的难度: '{s}'. 支持的难度: easy, medium, hard"
            ))),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

// 选择题选项
//
// id 在题目内唯一，由创建请求显式给出或按序号生成，
// 学生提交时只回传选中的 id。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

// 配对题词条
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

// 题目实体
//
// 答案字段按题型取用：选择题读 choices，判断题读 correct_answer，
// 配对题读 pairs，填空题读 correct_answers；问答/论述题无自动答案。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    pub id: i64,
    pub teacher_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub correct_answer: Option<bool>,
    #[serde(default)]
    pub pairs: Vec<MatchPair>,
    #[serde(default)]
    pub correct_answers: Vec<String>,
    pub topic: QuestionTopic,
    pub difficulty: Difficulty,
    pub points: f64,
    pub explanation: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
