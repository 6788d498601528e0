//! 纯判分引擎
//!
//! 只做内存计算，不触存储不触网络，任何畸形输入都判错而不是报错。
//! 问答题与论述题一律判 0 分，等教师人工批改覆盖。

use crate::models::questions::entities::{MatchPair, Question, QuestionType};
use crate::models::responses::entities::ResponseAnswer;
use crate::models::responses::requests::AnswerGrade;
use std::collections::HashMap;

// 单题判分结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeOutcome {
    pub is_correct: bool,
    pub points_earned: f64,
}

impl GradeOutcome {
    fn incorrect() -> Self {
        GradeOutcome {
            is_correct: false,
            points_earned: 0.0,
        }
    }

    fn scored(is_correct: bool, points: f64) -> Self {
        GradeOutcome {
            is_correct,
            points_earned: if is_correct { points } else { 0.0 },
        }
    }
}

// 答卷总分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTotals {
    pub total_score: f64,
    pub percentage: f64,
}

/// 对单题作答判分
///
/// answer 的 JSON 形态随题型变化，形态不符一律判错。
pub fn grade_answer(question: &Question, answer: &serde_json::Value) -> GradeOutcome {
    match question.question_type {
        QuestionType::MultipleChoice => grade_multiple_choice(question, answer),
        QuestionType::TrueFalse => grade_true_false(question, answer),
        QuestionType::Matching => grade_matching(question, answer),
        QuestionType::FillInTheBlank => grade_fill_in_the_blank(question, answer),
        // 人工批改题型，自动判分阶段不给分
        QuestionType::ShortAnswer | QuestionType::Essay => GradeOutcome::incorrect(),
    }
}

// 选择题：答案是选项 id，未知 id 判错
fn grade_multiple_choice(question: &Question, answer: &serde_json::Value) -> GradeOutcome {
    let Some(selected_id) = answer.as_str() else {
        return GradeOutcome::incorrect();
    };

    match question.choices.iter().find(|c| c.id == selected_id) {
        Some(choice) => GradeOutcome::scored(choice.is_correct, question.points),
        None => GradeOutcome::incorrect(),
    }
}

// 判断题：布尔严格相等
fn grade_true_false(question: &Question, answer: &serde_json::Value) -> GradeOutcome {
    match (answer.as_bool(), question.correct_answer) {
        (Some(given), Some(expected)) => GradeOutcome::scored(given == expected, question.points),
        _ => GradeOutcome::incorrect(),
    }
}

// 配对题：全对全错，左项找到且右项一致，数量必须吻合
fn grade_matching(question: &Question, answer: &serde_json::Value) -> GradeOutcome {
    let Ok(given) = serde_json::from_value::<Vec<MatchPair>>(answer.clone()) else {
        return GradeOutcome::incorrect();
    };

    if given.len() != question.pairs.len() || question.pairs.is_empty() {
        return GradeOutcome::incorrect();
    }

    let all_matched = question.pairs.iter().all(|pair| {
        given
            .iter()
            .find(|g| g.left == pair.left)
            .is_some_and(|g| g.right == pair.right)
    });

    GradeOutcome::scored(all_matched, question.points)
}

// 填空题：按位置比对，大小写不敏感，两侧去空白，全对全错
fn grade_fill_in_the_blank(question: &Question, answer: &serde_json::Value) -> GradeOutcome {
    let Ok(given) = serde_json::from_value::<Vec<String>>(answer.clone()) else {
        return GradeOutcome::incorrect();
    };

    if given.len() != question.correct_answers.len() || question.correct_answers.is_empty() {
        return GradeOutcome::incorrect();
    }

    let all_blanks_correct = given.iter().zip(question.correct_answers.iter()).all(
        |(student, expected)| {
            !student.is_empty()
                && !expected.is_empty()
                && student.trim().to_lowercase() == expected.trim().to_lowercase()
        },
    );

    GradeOutcome::scored(all_blanks_correct, question.points)
}

/// 按题目清单批量判分
///
/// 作答的 answer 与 time_spent 原样保留，只覆盖判分字段；
/// 题目清单里找不到的作答不给分。
pub fn grade_response_answers(
    questions: &[Question],
    answers: &[ResponseAnswer],
) -> Vec<ResponseAnswer> {
    let question_map: HashMap<i64, &Question> =
        questions.iter().map(|q| (q.id, q)).collect();

    answers
        .iter()
        .map(|answer| {
            let outcome = match question_map.get(&answer.question_id) {
                Some(question) => grade_answer(question, &answer.answer),
                None => GradeOutcome::incorrect(),
            };

            ResponseAnswer {
                question_id: answer.question_id,
                answer: answer.answer.clone(),
                is_correct: outcome.is_correct,
                points_earned: outcome.points_earned,
                time_spent: answer.time_spent,
            }
        })
        .collect()
}

/// 计算答卷总分与百分比
///
/// 总是从作答明细整体重算，重复调用结果一致。
pub fn compute_totals(answers: &[ResponseAnswer], max_score: f64) -> ScoreTotals {
    let total_score: f64 = answers.iter().map(|a| a.points_earned).sum();
    let percentage = if max_score > 0.0 {
        total_score / max_score * 100.0
    } else {
        0.0
    };

    ScoreTotals {
        total_score,
        percentage,
    }
}

/// 房间题目总分，作为答卷创建时的满分快照
pub fn sum_points(questions: &[Question]) -> f64 {
    questions.iter().map(|q| q.points).sum()
}

/// 套用教师人工批改结果
///
/// 只覆盖列出的题目，按 question_id 匹配，未列出的保持原判。
pub fn apply_manual_grades(answers: &mut [ResponseAnswer], grades: &[AnswerGrade]) {
    let grade_map: HashMap<i64, &AnswerGrade> =
        grades.iter().map(|g| (g.question_id, g)).collect();

    for answer in answers.iter_mut() {
        if let Some(grade) = grade_map.get(&answer.question_id) {
            answer.is_correct = grade.is_correct;
            answer.points_earned = grade.points_earned;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::questions::entities::{Choice, Difficulty, QuestionTopic};
    use serde_json::json;

    fn base_question(id: i64, question_type: QuestionType, points: f64) -> Question {
        Question {
            id,
            teacher_id: 1,
            question_text: "Sample question".to_string(),
            question_type,
            choices: vec![],
            correct_answer: None,
            pairs: vec![],
            correct_answers: vec![],
            topic: QuestionTopic::Other,
            difficulty: Difficulty::Medium,
            points,
            explanation: None,
            tags: vec![],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn multiple_choice(id: i64, points: f64) -> Question {
        let mut q = base_question(id, QuestionType::MultipleChoice, points);
        q.choices = vec![
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
            Choice {
                id: "3".to_string(),
                text: "Ribosome".to_string(),
                is_correct: false,
            },
        ];
        q
    }

    fn true_false(id: i64, expected: bool, points: f64) -> Question {
        let mut q = base_question(id, QuestionType::TrueFalse, points);
        q.correct_answer = Some(expected);
        q
    }

    fn matching(id: i64, points: f64) -> Question {
        let mut q = base_question(id, QuestionType::Matching, points);
        q.pairs = vec![
            MatchPair {
                left: "A".to_string(),
                right: "1".to_string(),
            },
            MatchPair {
                left: "B".to_string(),
                right: "2".to_string(),
            },
        ];
        q
    }

    fn fill_blank(id: i64, points: f64) -> Question {
        let mut q = base_question(id, QuestionType::FillInTheBlank, points);
        q.correct_answers = vec!["Mitochondria".to_string(), "Chloroplast".to_string()];
        q
    }

    fn answer_input(question_id: i64, answer: serde_json::Value) -> ResponseAnswer {
        ResponseAnswer {
            question_id,
            answer,
            is_correct: false,
            points_earned: 0.0,
            time_spent: 30,
        }
    }

    #[test]
    fn test_multiple_choice_correct() {
        let q = multiple_choice(1, 2.0);
        let outcome = grade_answer(&q, &json!("2"));
        assert!(outcome.is_correct);
        assert_eq!(outcome.points_earned, 2.0);
    }

    #[test]
    fn test_multiple_choice_wrong_choice() {
        let q = multiple_choice(1, 2.0);
        let outcome = grade_answer(&q, &json!("1"));
        assert!(!outcome.is_correct);
        assert_eq!(outcome.points_earned, 0.0);
    }

    #[test]
    fn test_multiple_choice_unknown_id() {
        let q = multiple_choice(1, 2.0);
        assert!(!grade_answer(&q, &json!("99")).is_correct);
        assert!(!grade_answer(&q, &json!(null)).is_correct);
        assert!(!grade_answer(&q, &json!(2)).is_correct);
    }

    #[test]
    fn test_true_false_strict_equality() {
        let q = true_false(1, true, 1.0);
        assert!(grade_answer(&q, &json!(true)).is_correct);
        assert!(!grade_answer(&q, &json!(false)).is_correct);
        // 字符串 "true" 不做宽松转换
        assert!(!grade_answer(&q, &json!("true")).is_correct);
        assert!(!grade_answer(&q, &json!(1)).is_correct);
    }

    #[test]
    fn test_true_false_missing_key() {
        let q = base_question(1, QuestionType::TrueFalse, 1.0);
        assert!(!grade_answer(&q, &json!(true)).is_correct);
        assert!(!grade_answer(&q, &json!(false)).is_correct);
    }

    #[test]
    fn test_matching_all_pairs_correct() {
        let q = matching(1, 4.0);
        let answer = json!([
            { "left": "B", "right": "2" },
            { "left": "A", "right": "1" }
        ]);
        // 顺序无关，按 left 匹配
        let outcome = grade_answer(&q, &answer);
        assert!(outcome.is_correct);
        assert_eq!(outcome.points_earned, 4.0);
    }

    #[test]
    fn test_matching_one_wrong_pair_zero_points() {
        let q = matching(1, 4.0);
        let answer = json!([
            { "left": "A", "right": "1" },
            { "left": "B", "right": "3" }
        ]);
        let outcome = grade_answer(&q, &answer);
        assert!(!outcome.is_correct);
        assert_eq!(outcome.points_earned, 0.0);
    }

    #[test]
    fn test_matching_incomplete_submission() {
        let q = matching(1, 4.0);
        assert!(!grade_answer(&q, &json!([{ "left": "A", "right": "1" }])).is_correct);
        assert!(!grade_answer(&q, &json!([])).is_correct);
        // 多配也不行
        let extra = json!([
            { "left": "A", "right": "1" },
            { "left": "B", "right": "2" },
            { "left": "C", "right": "3" }
        ]);
        assert!(!grade_answer(&q, &extra).is_correct);
    }

    #[test]
    fn test_matching_malformed_answer() {
        let q = matching(1, 4.0);
        assert!(!grade_answer(&q, &json!("A-1,B-2")).is_correct);
        assert!(!grade_answer(&q, &json!([{ "lhs": "A" }])).is_correct);
        assert!(!grade_answer(&q, &json!(null)).is_correct);
    }

    #[test]
    fn test_fill_blank_case_and_whitespace_insensitive() {
        let q = fill_blank(1, 2.0);
        let answer = json!([" mitochondria ", "CHLOROPLAST"]);
        let outcome = grade_answer(&q, &answer);
        assert!(outcome.is_correct);
        assert_eq!(outcome.points_earned, 2.0);
    }

    #[test]
    fn test_fill_blank_positional() {
        let q = fill_blank(1, 2.0);
        // 两空都对但位置交换，不给分
        let swapped = json!(["Chloroplast", "Mitochondria"]);
        assert!(!grade_answer(&q, &swapped).is_correct);
    }

    #[test]
    fn test_fill_blank_length_mismatch() {
        let q = fill_blank(1, 2.0);
        assert!(!grade_answer(&q, &json!(["Mitochondria"])).is_correct);
        assert!(
            !grade_answer(&q, &json!(["Mitochondria", "Chloroplast", "extra"])).is_correct
        );
        assert!(!grade_answer(&q, &json!([])).is_correct);
    }

    #[test]
    fn test_fill_blank_empty_entry() {
        let q = fill_blank(1, 2.0);
        assert!(!grade_answer(&q, &json!(["", "Chloroplast"])).is_correct);
    }

    #[test]
    fn test_manual_question_types_score_zero() {
        let short = base_question(1, QuestionType::ShortAnswer, 5.0);
        let essay = base_question(2, QuestionType::Essay, 10.0);

        let outcome = grade_answer(&short, &json!("Osmosis is diffusion of water"));
        assert!(!outcome.is_correct);
        assert_eq!(outcome.points_earned, 0.0);

        let outcome = grade_answer(&essay, &json!("Long essay text"));
        assert!(!outcome.is_correct);
        assert_eq!(outcome.points_earned, 0.0);
    }

    #[test]
    fn test_grading_is_deterministic() {
        let q = multiple_choice(1, 2.0);
        let answer = json!("2");
        let first = grade_answer(&q, &answer);
        let second = grade_answer(&q, &answer);
        assert_eq!(first, second);
    }

    #[test]
    fn test_grade_response_answers_preserves_answer_and_time() {
        let questions = vec![multiple_choice(1, 2.0), true_false(2, false, 1.0)];
        let answers = vec![answer_input(1, json!("2")), answer_input(2, json!(false))];

        let graded = grade_response_answers(&questions, &answers);
        assert_eq!(graded.len(), 2);
        assert!(graded[0].is_correct);
        assert_eq!(graded[0].answer, json!("2"));
        assert_eq!(graded[0].time_spent, 30);
        assert!(graded[1].is_correct);
        assert_eq!(graded[1].points_earned, 1.0);
    }

    #[test]
    fn test_grade_response_answers_unknown_question() {
        let questions = vec![multiple_choice(1, 2.0)];
        let answers = vec![answer_input(999, json!("2"))];

        let graded = grade_response_answers(&questions, &answers);
        assert_eq!(graded.len(), 1);
        assert!(!graded[0].is_correct);
        assert_eq!(graded[0].points_earned, 0.0);
        // 原始作答保留，便于教师复核
        assert_eq!(graded[0].answer, json!("2"));
    }

    #[test]
    fn test_compute_totals() {
        let answers = vec![
            ResponseAnswer {
                question_id: 1,
                answer: json!("2"),
                is_correct: true,
                points_earned: 2.0,
                time_spent: 0,
            },
            ResponseAnswer {
                question_id: 2,
                answer: json!(true),
                is_correct: true,
                points_earned: 1.0,
                time_spent: 0,
            },
        ];

        let totals = compute_totals(&answers, 3.0);
        assert_eq!(totals.total_score, 3.0);
        assert_eq!(totals.percentage, 100.0);
    }

    #[test]
    fn test_compute_totals_zero_max_score() {
        let totals = compute_totals(&[], 0.0);
        assert_eq!(totals.total_score, 0.0);
        assert_eq!(totals.percentage, 0.0);
    }

    #[test]
    fn test_compute_totals_idempotent() {
        let answers = vec![ResponseAnswer {
            question_id: 1,
            answer: json!("2"),
            is_correct: true,
            points_earned: 2.0,
            time_spent: 0,
        }];

        let first = compute_totals(&answers, 4.0);
        let second = compute_totals(&answers, 4.0);
        assert_eq!(first, second);
        assert_eq!(first.percentage, 50.0);
    }

    #[test]
    fn test_full_quiz_flow() {
        // 两道选择一道判断，满分 5 分，全对 100%
        let questions = vec![
            multiple_choice(1, 2.0),
            multiple_choice(2, 2.0),
            true_false(3, true, 1.0),
        ];
        let max_score = sum_points(&questions);
        assert_eq!(max_score, 5.0);

        let answers = vec![
            answer_input(1, json!("2")),
            answer_input(2, json!("2")),
            answer_input(3, json!(true)),
        ];

        let graded = grade_response_answers(&questions, &answers);
        let totals = compute_totals(&graded, max_score);
        assert_eq!(totals.total_score, 5.0);
        assert_eq!(totals.percentage, 100.0);
    }

    #[test]
    fn test_manual_grade_overrides_essay() {
        // 论述题自动判 0 分，教师补分后按新分数重算
        let questions = vec![
            multiple_choice(1, 1.0),
            base_question(2, QuestionType::Essay, 4.0),
        ];
        let max_score = sum_points(&questions);
        assert_eq!(max_score, 5.0);

        let answers = vec![
            answer_input(1, json!("2")),
            answer_input(2, json!("Natural selection favors fit phenotypes")),
        ];

        let mut graded = grade_response_answers(&questions, &answers);
        let before = compute_totals(&graded, max_score);
        assert_eq!(before.total_score, 1.0);
        assert_eq!(before.percentage, 20.0);

        apply_manual_grades(
            &mut graded,
            &[AnswerGrade {
                question_id: 2,
                is_correct: true,
                points_earned: 3.0,
            }],
        );

        let after = compute_totals(&graded, max_score);
        assert_eq!(after.total_score, 4.0);
        assert_eq!(after.percentage, 80.0);

        // 重复套用同一批改结果不改变总分
        apply_manual_grades(
            &mut graded,
            &[AnswerGrade {
                question_id: 2,
                is_correct: true,
                points_earned: 3.0,
            }],
        );
        let again = compute_totals(&graded, max_score);
        assert_eq!(again, after);
    }

    #[test]
    fn test_manual_grade_untouched_answers_keep_result() {
        let questions = vec![multiple_choice(1, 2.0)];
        let answers = vec![answer_input(1, json!("2"))];
        let mut graded = grade_response_answers(&questions, &answers);

        apply_manual_grades(
            &mut graded,
            &[AnswerGrade {
                question_id: 999,
                is_correct: true,
                points_earned: 10.0,
            }],
        );

        assert!(graded[0].is_correct);
        assert_eq!(graded[0].points_earned, 2.0);
    }
}
