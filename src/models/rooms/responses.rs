use super::entities::{Room, RoomSettings, RoomStatus};
use crate::models::common::PaginationInfo;
use crate::models::questions::entities::{Question, QuestionType};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 房间列表响应，会整页进缓存，所以两个方向都要可序列化
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct RoomListResponse {
    pub items: Vec<Room>,
    pub pagination: PaginationInfo,
}

impl RoomListResponse {
    pub fn empty(page: i64, page_size: i64) -> Self {
        RoomListResponse {
            items: vec![],
            pagination: PaginationInfo {
                page,
                page_size,
                total: 0,
                total_pages: 0,
            },
        }
    }
}

// 教师端房间详情，题目为完整实体（含答案）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct RoomDetailResponse {
    pub room: Room,
    pub questions: Vec<Question>,
}

// 学生端选项，不携带 is_correct
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct PublicChoice {
    pub id: String,
    pub text: String,
}

// 学生端题目视图
//
// 配对题只下发左列原序与右列乱序后的候选池，
// 填空题只下发空位数量，答案本体一律不出网。
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct PublicQuestion {
    pub id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub choices: Vec<PublicChoice>,
    pub match_lefts: Vec<String>,
    pub match_rights: Vec<String>,
    pub blank_count: usize,
    pub points: f64,
}

impl PublicQuestion {
    pub fn from_question(question: &Question) -> Self {
        let choices = question
            .choices
            .iter()
            .map(|c| PublicChoice {
                id: c.id.clone(),
                text: c.text.clone(),
            })
            .collect();

        let match_lefts = question.pairs.iter().map(|p| p.left.clone()).collect();
        // 右列排序后下发，避免与左列顺序对齐泄露配对关系
        let mut match_rights: Vec<String> =
            question.pairs.iter().map(|p| p.right.clone()).collect();
        match_rights.sort();

        PublicQuestion {
            id: question.id,
            question_text: question.question_text.clone(),
            question_type: question.question_type,
            choices,
            match_lefts,
            match_rights,
            blank_count: question.correct_answers.len(),
            points: question.points,
        }
    }
}

// 学生通过房间码拿到的房间视图
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct PublicRoomView {
    pub id: i64,
    pub room_code: String,
    pub title: String,
    pub description: Option<String>,
    pub status: RoomStatus,
    pub settings: RoomSettings,
    pub questions: Vec<PublicQuestion>,
    pub question_count: usize,
}

impl PublicRoomView {
    pub fn from_room(room: &Room, questions: &[Question]) -> Self {
        let questions: Vec<PublicQuestion> =
            questions.iter().map(PublicQuestion::from_question).collect();
        let question_count = questions.len();

        PublicRoomView {
            id: room.id,
            room_code: room.room_code.clone(),
            title: room.title.clone(),
            description: room.description.clone(),
            status: room.status,
            settings: room.settings.clone(),
            questions,
            question_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::questions::entities::{Choice, Difficulty, MatchPair, QuestionTopic};

    fn matching_question() -> Question {
        Question {
            id: 7,
            teacher_id: 1,
            question_text: "Match the organelle to its function".to_string(),
            question_type: QuestionType::Matching,
            choices: vec![],
            correct_answer: None,
            pairs: vec![
                MatchPair {
                    left: "Mitochondria".to_string(),
                    right: "ATP synthesis".to_string(),
                },
                MatchPair {
                    left: "Ribosome".to_string(),
                    right: "Protein synthesis".to_string(),
                },
            ],
            correct_answers: vec![],
            topic: QuestionTopic::Other,
            difficulty: Difficulty::Medium,
            points: 2.0,
            explanation: None,
            tags: vec![],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_public_question_strips_choice_answers() {
        let mut question = matching_question();
        question.question_type = QuestionType::MultipleChoice;
        question.pairs = vec![];
        question.choices = vec![
            Choice {
                id: "1".to_string(),
                text: "Nucleus".to_string(),
                is_correct: false,
            },
            Choice {
                id: "2".to_string(),
                text: "Mitochondria".to_string(),
                is_correct: true,
            },
        ];

        let public = PublicQuestion::from_question(&question);
        assert_eq!(public.choices.len(), 2);
        let json = serde_json::to_value(&public).unwrap();
        assert!(json["choices"][0].get("is_correct").is_none());
        assert!(json.get("correct_answer").is_none());
    }

    #[test]
    fn test_public_question_shuffles_pair_alignment() {
        let question = matching_question();
        let public = PublicQuestion::from_question(&question);

        assert_eq!(public.match_lefts, vec!["Mitochondria", "Ribosome"]);
        // 右列按字典序下发，不保留与左列的对应关系
        assert_eq!(public.match_rights, vec!["ATP synthesis", "Protein synthesis"]);
        assert_eq!(public.blank_count, 0);
    }

    #[test]
    fn test_public_question_blank_count_only() {
        let mut question = matching_question();
        question.question_type = QuestionType::FillInTheBlank;
        question.pairs = vec![];
        question.correct_answers = vec!["xylem".to_string(), "phloem".to_string()];

        let public = PublicQuestion::from_question(&question);
        assert_eq!(public.blank_count, 2);
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("correct_answers").is_none());
    }
}
