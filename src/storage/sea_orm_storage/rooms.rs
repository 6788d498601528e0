use super::SeaOrmStorage;
use crate::entity::rooms::{ActiveModel, Column, Entity as Rooms};
use crate::errors::{QuizRoomError, Result};
use crate::models::{
    PaginationInfo,
    rooms::{
        entities::{Room, RoomStatus},
        requests::{CreateRoomRequest, RoomListQuery, UpdateRoomRequest},
        responses::RoomListResponse,
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建房间
    ///
    /// room_code 唯一性由服务层查重加唯一索引双重保证。
    pub async fn create_room_impl(
        &self,
        teacher_id: i64,
        room_code: String,
        req: CreateRoomRequest,
        expires_at: i64,
    ) -> Result<Room> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            room_code: Set(room_code),
            title: Set(req.title),
            description: Set(req.description),
            question_ids: Set(serde_json::to_string(&req.question_ids)?),
            settings: Set(serde_json::to_string(&req.settings)?),
            status: Set(RoomStatus::Draft.to_string()),
            expires_at: Set(expires_at),
            total_participants: Set(0),
            total_submissions: Set(0),
            average_score: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建房间失败: {e}")))?;

        Ok(result.into_room())
    }

    /// 通过 ID 获取房间
    pub async fn get_room_by_id_impl(&self, id: i64) -> Result<Option<Room>> {
        let result = Rooms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询房间失败: {e}")))?;

        Ok(result.map(|m| m.into_room()))
    }

    /// 通过房间码获取房间
    pub async fn get_room_by_code_impl(&self, room_code: &str) -> Result<Option<Room>> {
        let result = Rooms::find()
            .filter(Column::RoomCode.eq(room_code))
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询房间失败: {e}")))?;

        Ok(result.map(|m| m.into_room()))
    }

    /// 分页列出教师的房间
    pub async fn list_rooms_with_pagination_impl(
        &self,
        query: RoomListQuery,
    ) -> Result<RoomListResponse> {
        let page = (query.page.max(1)) as u64;
        let size = (query.size.clamp(1, 100)) as u64;
        let now = chrono::Utc::now().timestamp();

        // 过期房间对外等同不存在，列表同样不露出
        let mut select = Rooms::find()
            .filter(Column::TeacherId.eq(query.teacher_id))
            .filter(Column::ExpiresAt.gte(now));

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询房间总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询房间页数失败: {e}")))?;

        let rooms = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询房间列表失败: {e}")))?;

        Ok(RoomListResponse {
            items: rooms.into_iter().map(|m| m.into_room()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新房间
    pub async fn update_room_impl(
        &self,
        id: i64,
        update: UpdateRoomRequest,
    ) -> Result<Option<Room>> {
        // 先检查房间是否存在
        let existing = self.get_room_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(question_ids) = update.question_ids {
            model.question_ids = Set(serde_json::to_string(&question_ids)?);
        }

        if let Some(settings) = update.settings {
            model.settings = Set(serde_json::to_string(&settings)?);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("更新房间失败: {e}")))?;

        self.get_room_by_id_impl(id).await
    }

    /// 更新房间状态
    ///
    /// 首次激活记 start_date，首次关闭记 end_date，状态合法性由服务层把关。
    pub async fn update_room_status_impl(
        &self,
        id: i64,
        status: RoomStatus,
    ) -> Result<Option<Room>> {
        let Some(existing) = self.get_room_by_id_impl(id).await? else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        if status == RoomStatus::Active && existing.start_date.is_none() {
            model.start_date = Set(Some(now));
        }
        if status == RoomStatus::Closed && existing.end_date.is_none() {
            model.end_date = Set(Some(now));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("更新房间状态失败: {e}")))?;

        self.get_room_by_id_impl(id).await
    }

    /// 向房间追加题目，已存在的题目 id 跳过
    pub async fn add_questions_to_room_impl(
        &self,
        id: i64,
        question_ids: &[i64],
    ) -> Result<Option<Room>> {
        let Some(existing) = self.get_room_by_id_impl(id).await? else {
            return Ok(None);
        };

        let mut merged = existing.question_ids;
        for qid in question_ids {
            if !merged.contains(qid) {
                merged.push(*qid);
            }
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            question_ids: Set(serde_json::to_string(&merged)?),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("追加房间题目失败: {e}")))?;

        self.get_room_by_id_impl(id).await
    }

    /// participant 计数加一
    pub async fn increment_room_participants_impl(&self, room_id: i64) -> Result<bool> {
        use sea_orm::ExprTrait;

        let now = chrono::Utc::now().timestamp();

        let result = Rooms::update_many()
            .col_expr(
                Column::TotalParticipants,
                Expr::col(Column::TotalParticipants).add(1),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(room_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                QuizRoomError::database_operation(format!("更新房间参与人数失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 提交计数加一并整体覆盖平均分
    pub async fn record_room_submission_impl(
        &self,
        room_id: i64,
        average_score: f64,
    ) -> Result<bool> {
        use sea_orm::ExprTrait;

        let now = chrono::Utc::now().timestamp();

        let result = Rooms::update_many()
            .col_expr(
                Column::TotalSubmissions,
                Expr::col(Column::TotalSubmissions).add(1),
            )
            .col_expr(Column::AverageScore, Expr::value(average_score))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(room_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                QuizRoomError::database_operation(format!("更新房间提交统计失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_room_average_impl(&self, room_id: i64, average_score: f64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Rooms::update_many()
            .col_expr(Column::AverageScore, Expr::value(average_score))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(room_id))
            .exec(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("更新房间平均分失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除房间，答卷随外键级联删除
    pub async fn delete_room_impl(&self, id: i64) -> Result<bool> {
        let result = Rooms::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("删除房间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 清理过期房间
    pub async fn delete_expired_rooms_impl(&self, now: i64) -> Result<u64> {
        let result = Rooms::delete_many()
            .filter(Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("清理过期房间失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
