use super::SeaOrmStorage;
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{QuizRoomError, Result};
use crate::models::{
    PaginationInfo,
    questions::{
        entities::{Choice, Question, QuestionTopic},
        requests::{ChoiceInput, CreateQuestionRequest, QuestionListQuery, UpdateQuestionRequest},
        responses::QuestionListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

// 集合字段以 JSON 文本落库，空集合存 NULL
fn to_json_column<T: serde::Serialize>(values: &[T]) -> Result<Option<String>> {
    if values.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::to_string(values)?))
    }
}

fn assign_choice_ids(inputs: Vec<ChoiceInput>) -> Vec<Choice> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(i, c)| c.into_choice(i))
        .collect()
}

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_question_impl(
        &self,
        teacher_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        let now = chrono::Utc::now().timestamp();
        let choices = assign_choice_ids(req.choices);

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            question_text: Set(req.question_text),
            question_type: Set(req.question_type.to_string()),
            choices: Set(to_json_column(&choices)?),
            correct_answer: Set(req.correct_answer),
            pairs: Set(to_json_column(&req.pairs)?),
            correct_answers: Set(to_json_column(&req.correct_answers)?),
            topic: Set(req.topic.to_string()),
            difficulty: Set(req.difficulty.unwrap_or_default().to_string()),
            points: Set(req.points.unwrap_or(1.0)),
            explanation: Set(req.explanation),
            tags: Set(to_json_column(&req.tags)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 分页列出题目
    pub async fn list_questions_with_pagination_impl(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse> {
        let page = (query.page.max(1)) as u64;
        let size = (query.size.clamp(1, 100)) as u64;

        let mut select = Questions::find().filter(Column::TeacherId.eq(query.teacher_id));

        if let Some(topic) = query.topic {
            select = select.filter(Column::Topic.eq(topic.to_string()));
        }

        if let Some(difficulty) = query.difficulty {
            select = select.filter(Column::Difficulty.eq(difficulty.to_string()));
        }

        if let Some(question_type) = query.question_type {
            select = select.filter(Column::QuestionType.eq(question_type.to_string()));
        }

        // 按题干搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::QuestionText.contains(&escaped));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询题目总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询题目页数失败: {e}")))?;

        let questions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(QuestionListResponse {
            items: questions.into_iter().map(|m| m.into_question()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按主题列出教师的题目
    pub async fn list_questions_by_topic_impl(
        &self,
        teacher_id: i64,
        topic: QuestionTopic,
    ) -> Result<Vec<Question>> {
        let results = Questions::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Topic.eq(topic.to_string()))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("按主题查询题目失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_question()).collect())
    }

    /// 批量获取题目，返回顺序不保证与入参一致
    pub async fn get_questions_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Question>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let results = Questions::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("批量查询题目失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_question()).collect())
    }

    /// 更新题目
    pub async fn update_question_impl(
        &self,
        id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        // 先检查题目是否存在
        let existing = self.get_question_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(question_text) = update.question_text {
            model.question_text = Set(question_text);
        }

        if let Some(question_type) = update.question_type {
            model.question_type = Set(question_type.to_string());
        }

        if let Some(choices) = update.choices {
            let choices = assign_choice_ids(choices);
            model.choices = Set(to_json_column(&choices)?);
        }

        if let Some(correct_answer) = update.correct_answer {
            model.correct_answer = Set(Some(correct_answer));
        }

        if let Some(pairs) = update.pairs {
            model.pairs = Set(to_json_column(&pairs)?);
        }

        if let Some(correct_answers) = update.correct_answers {
            model.correct_answers = Set(to_json_column(&correct_answers)?);
        }

        if let Some(topic) = update.topic {
            model.topic = Set(topic.to_string());
        }

        if let Some(difficulty) = update.difficulty {
            model.difficulty = Set(difficulty.to_string());
        }

        if let Some(points) = update.points {
            model.points = Set(points);
        }

        if let Some(explanation) = update.explanation {
            model.explanation = Set(Some(explanation));
        }

        if let Some(tags) = update.tags {
            model.tags = Set(to_json_column(&tags)?);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("更新题目失败: {e}")))?;

        self.get_question_by_id_impl(id).await
    }

    /// 删除题目
    pub async fn delete_question_impl(&self, id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
