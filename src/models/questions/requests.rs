use super::entities::{Choice, Difficulty, MatchPair, QuestionTopic, QuestionType};
use crate::models::common::PaginationQuery;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 创建题目请求
//
// 与答案相关的字段按题型取用，其余字段忽略。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CreateQuestionRequest {
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub choices: Vec<ChoiceInput>,
    pub correct_answer: Option<bool>,
    #[serde(default)]
    pub pairs: Vec<MatchPair>,
    #[serde(default)]
    pub correct_answers: Vec<String>,
    pub topic: QuestionTopic,
    pub difficulty: Option<Difficulty>,
    pub points: Option<f64>,
    pub explanation: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

// 创建时选项可以不带 id，由服务端按序号补齐
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct ChoiceInput {
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl ChoiceInput {
    /// 缺省 id 按位置生成（"1"、"2"、...）
    pub fn into_choice(self, position: usize) -> Choice {
        Choice {
            id: self.id.unwrap_or_else(|| (position + 1).to_string()),
            text: self.text,
            is_correct: self.is_correct,
        }
    }
}

// 更新题目请求，未提供的字段保持不变
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct UpdateQuestionRequest {
    pub question_text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub choices: Option<Vec<ChoiceInput>>,
    pub correct_answer: Option<bool>,
    pub pairs: Option<Vec<MatchPair>>,
    pub correct_answers: Option<Vec<String>>,
    pub topic: Option<QuestionTopic>,
    pub difficulty: Option<Difficulty>,
    pub points: Option<f64>,
    pub explanation: Option<String>,
    pub tags: Option<Vec<String>>,
}

// 题目列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub question_type: Option<String>,
    /// 按题干模糊搜索
    pub search: Option<String>,
}

// 存储层查询条件
#[derive(Debug, Clone)]
pub struct QuestionListQuery {
    pub teacher_id: i64,
    pub page: i64,
    pub size: i64,
    pub topic: Option<QuestionTopic>,
    pub difficulty: Option<Difficulty>,
    pub question_type: Option<QuestionType>,
    pub search: Option<String>,
}
