use super::SeaOrmStorage;
use crate::entity::student_responses::{ActiveModel, Column, Entity as StudentResponses};
use crate::errors::{QuizRoomError, Result};
use crate::models::responses::{
    entities::{ResponseAnswer, ResponseStatus, StudentInfo, StudentResponse},
    requests::UpdateResponseRequest,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建答卷
    ///
    /// max_score 在此刻快照，之后房间换题不影响该答卷。
    pub async fn create_response_impl(
        &self,
        room_id: i64,
        student_info: StudentInfo,
        answers: Vec<ResponseAnswer>,
        max_score: f64,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<StudentResponse> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            room_id: Set(room_id),
            student_name: Set(student_info.name),
            student_lrn: Set(student_info.lrn),
            student_section: Set(student_info.section),
            student_email: Set(student_info.email),
            answers: Set(serde_json::to_string(&answers)?),
            total_score: Set(0.0),
            max_score: Set(max_score),
            percentage: Set(0.0),
            status: Set(ResponseStatus::InProgress.to_string()),
            started_at: Set(now),
            total_time_spent: Set(0),
            ip_address: Set(ip_address),
            user_agent: Set(user_agent),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建答卷失败: {e}")))?;

        Ok(result.into_response())
    }

    /// 通过 ID 获取答卷
    pub async fn get_response_by_id_impl(&self, id: i64) -> Result<Option<StudentResponse>> {
        let result = StudentResponses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询答卷失败: {e}")))?;

        Ok(result.map(|m| m.into_response()))
    }

    /// 保存作答进度
    ///
    /// 判分字段一律归零，成绩只在交卷与批改时产生。
    pub async fn update_response_progress_impl(
        &self,
        id: i64,
        update: UpdateResponseRequest,
    ) -> Result<Option<StudentResponse>> {
        let existing = self.get_response_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(answers) = update.answers {
            let answers: Vec<ResponseAnswer> = answers
                .into_iter()
                .map(|a| ResponseAnswer {
                    question_id: a.question_id,
                    answer: a.answer,
                    is_correct: false,
                    points_earned: 0.0,
                    time_spent: a.time_spent,
                })
                .collect();
            model.answers = Set(serde_json::to_string(&answers)?);
        }

        if let Some(total_time_spent) = update.total_time_spent {
            model.total_time_spent = Set(total_time_spent);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("保存作答进度失败: {e}")))?;

        self.get_response_by_id_impl(id).await
    }

    /// 条件交卷
    ///
    /// 只有 in-progress 的行会被命中，并发重复交卷只有一次生效，
    /// 返回 false 时由调用方区分是不存在还是已交过。
    pub async fn submit_response_impl(
        &self,
        id: i64,
        answers: Vec<ResponseAnswer>,
        total_score: f64,
        percentage: f64,
        total_time_spent: i64,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = StudentResponses::update_many()
            .col_expr(Column::Answers, Expr::value(serde_json::to_string(&answers)?))
            .col_expr(Column::TotalScore, Expr::value(total_score))
            .col_expr(Column::Percentage, Expr::value(percentage))
            .col_expr(Column::TotalTimeSpent, Expr::value(total_time_spent))
            .col_expr(
                Column::Status,
                Expr::value(ResponseStatus::Submitted.to_string()),
            )
            .col_expr(Column::SubmittedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(ResponseStatus::InProgress.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("提交答卷失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 保存人工批改结果并置为 reviewed
    pub async fn save_response_grades_impl(
        &self,
        id: i64,
        answers: Vec<ResponseAnswer>,
        total_score: f64,
        percentage: f64,
    ) -> Result<Option<StudentResponse>> {
        let existing = self.get_response_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            answers: Set(serde_json::to_string(&answers)?),
            total_score: Set(total_score),
            percentage: Set(percentage),
            status: Set(ResponseStatus::Reviewed.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("保存批改结果失败: {e}")))?;

        self.get_response_by_id_impl(id).await
    }

    /// 列出房间答卷，交卷时间倒序，其次按创建时间倒序
    pub async fn list_responses_by_room_impl(
        &self,
        room_id: i64,
        status: Option<ResponseStatus>,
    ) -> Result<Vec<StudentResponse>> {
        let mut select = StudentResponses::find().filter(Column::RoomId.eq(room_id));

        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let results = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询房间答卷失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_response()).collect())
    }

    /// 统计房间答卷数量，全部状态都计入
    pub async fn count_responses_by_room_impl(&self, room_id: i64) -> Result<u64> {
        let count = StudentResponses::find()
            .filter(Column::RoomId.eq(room_id))
            .count(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("统计房间答卷失败: {e}")))?;

        Ok(count)
    }

    /// 删除答卷
    pub async fn delete_response_impl(&self, id: i64) -> Result<bool> {
        let result = StudentResponses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("删除答卷失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
