use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::middlewares::RequireJWT;
use crate::models::questions::entities::QuestionType;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_data: CreateQuestionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    // 按题型校验答案字段
    if let Err(msg) = validate_question_payload(&question_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::QuestionInvalid, msg)));
    }

    match storage.create_question(uid, question_data).await {
        Ok(question) => {
            info!("Question {} created by teacher {}", question.id, uid);

            let cache = service.get_cache(request);
            super::invalidate_question_caches(&cache, uid, None).await;

            Ok(HttpResponse::Created()
                .json(ApiResponse::success(question, "Question created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create question: {e}"),
            )),
        ),
    }
}

/// 按题型校验请求是否携带可判分的答案定义
pub(crate) fn validate_question_payload(data: &CreateQuestionRequest) -> Result<(), String> {
    if data.question_text.trim().is_empty() {
        return Err("题干不能为空".to_string());
    }

    if let Some(points) = data.points
        && points <= 0.0
    {
        return Err("分值必须大于 0".to_string());
    }

    match data.question_type {
        QuestionType::MultipleChoice => {
            if data.choices.len() < 2 {
                return Err("选择题至少需要两个选项".to_string());
            }
            if !data.choices.iter().any(|c| c.is_correct) {
                return Err("选择题至少需要一个正确选项".to_string());
            }
            if data.choices.iter().any(|c| c.text.trim().is_empty()) {
                return Err("选项内容不能为空".to_string());
            }
        }
        QuestionType::TrueFalse => {
            if data.correct_answer.is_none() {
                return Err("判断题必须提供正确答案".to_string());
            }
        }
        QuestionType::Matching => {
            if data.pairs.is_empty() {
                return Err("配对题至少需要一组配对".to_string());
            }
            let mut lefts: Vec<&str> = data.pairs.iter().map(|p| p.left.as_str()).collect();
            lefts.sort_unstable();
            lefts.dedup();
            if lefts.len() != data.pairs.len() {
                return Err("配对题左列不能重复".to_string());
            }
        }
        QuestionType::FillInTheBlank => {
            if data.correct_answers.is_empty()
                || data.correct_answers.iter().any(|a| a.trim().is_empty())
            {
                return Err("填空题的每个空都需要非空答案".to_string());
            }
        }
        // 简答与论述由教师人工批改，不需要答案定义
        QuestionType::ShortAnswer | QuestionType::Essay => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::questions::entities::{MatchPair, QuestionTopic};
    use crate::models::questions::requests::ChoiceInput;

    fn base_request(question_type: QuestionType) -> CreateQuestionRequest {
        CreateQuestionRequest {
            question_text: "什么是显性性状?".to_string(),
            question_type,
            choices: vec![],
            correct_answer: None,
            pairs: vec![],
            correct_answers: vec![],
            topic: QuestionTopic::GeneticEngineering,
            difficulty: None,
            points: None,
            explanation: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_multiple_choice_requires_correct_option() {
        let mut data = base_request(QuestionType::MultipleChoice);
        data.choices = vec![
            ChoiceInput {
                id: None,
                text: "A".to_string(),
                is_correct: false,
            },
            ChoiceInput {
                id: None,
                text: "B".to_string(),
                is_correct: false,
            },
        ];
        assert!(validate_question_payload(&data).is_err());

        data.choices[1].is_correct = true;
        assert!(validate_question_payload(&data).is_ok());
    }

    #[test]
    fn test_true_false_requires_answer() {
        let mut data = base_request(QuestionType::TrueFalse);
        assert!(validate_question_payload(&data).is_err());

        data.correct_answer = Some(true);
        assert!(validate_question_payload(&data).is_ok());
    }

    #[test]
    fn test_matching_rejects_duplicate_lefts() {
        let mut data = base_request(QuestionType::Matching);
        data.pairs = vec![
            MatchPair {
                left: "DNA".to_string(),
                right: "脱氧核糖核酸".to_string(),
            },
            MatchPair {
                left: "DNA".to_string(),
                right: "核糖核酸".to_string(),
            },
        ];
        assert!(validate_question_payload(&data).is_err());

        data.pairs[1].left = "RNA".to_string();
        assert!(validate_question_payload(&data).is_ok());
    }

    #[test]
    fn test_essay_needs_no_answer_key() {
        let data = base_request(QuestionType::Essay);
        assert!(validate_question_payload(&data).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_points() {
        let mut data = base_request(QuestionType::Essay);
        data.points = Some(0.0);
        assert!(validate_question_payload(&data).is_err());
    }
}
