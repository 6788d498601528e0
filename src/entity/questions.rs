//! 题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    pub question_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub choices: Option<String>,
    pub correct_answer: Option<bool>,
    #[sea_orm(column_type = "Text", nullable)]
    pub pairs: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub correct_answers: Option<String>,
    pub topic: String,
    pub difficulty: String,
    pub points: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub explanation: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
// choices/pairs/correct_answers/tags 以 JSON 文本存储，解析失败时回退为空
impl Model {
    pub fn into_question(self) -> crate::models::questions::entities::Question {
        use crate::models::questions::entities::{Difficulty, Question, QuestionTopic, QuestionType};
        use chrono::{DateTime, Utc};

        Question {
            id: self.id,
            teacher_id: self.teacher_id,
            question_text: self.question_text,
            question_type: self
                .question_type
                .parse::<QuestionType>()
                .unwrap_or(QuestionType::ShortAnswer),
            choices: self
                .choices
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default(),
            correct_answer: self.correct_answer,
            pairs: self
                .pairs
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default(),
            correct_answers: self
                .correct_answers
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default(),
            topic: self
                .topic
                .parse::<QuestionTopic>()
                .unwrap_or(QuestionTopic::Other),
            difficulty: self
                .difficulty
                .parse::<Difficulty>()
                .unwrap_or(Difficulty::Medium),
            points: self.points,
            explanation: self.explanation,
            tags: self
                .tags
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default(),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
