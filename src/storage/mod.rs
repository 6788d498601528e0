use std::sync::Arc;

use crate::models::{
    questions::{
        entities::{Question, QuestionTopic},
        requests::{CreateQuestionRequest, QuestionListQuery, UpdateQuestionRequest},
        responses::QuestionListResponse,
    },
    responses::{
        entities::{ResponseAnswer, ResponseStatus, StudentInfo, StudentResponse},
        requests::UpdateResponseRequest,
    },
    rooms::{
        entities::{Room, RoomStatus},
        requests::{CreateRoomRequest, RoomListQuery, UpdateRoomRequest},
        responses::RoomListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;
use crate::models::auth::requests::UpdateProfileRequest;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户资料
    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>>;
    // 更新用户密码哈希
    async fn update_user_password(&self, id: i64, password_hash: String) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 题库管理方法
    // 创建题目
    async fn create_question(
        &self,
        teacher_id: i64,
        question: CreateQuestionRequest,
    ) -> Result<Question>;
    // 通过ID获取题目
    async fn get_question_by_id(&self, id: i64) -> Result<Option<Question>>;
    // 列出题目
    async fn list_questions_with_pagination(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse>;
    // 按主题列出题目
    async fn list_questions_by_topic(
        &self,
        teacher_id: i64,
        topic: QuestionTopic,
    ) -> Result<Vec<Question>>;
    // 批量获取题目
    async fn get_questions_by_ids(&self, ids: &[i64]) -> Result<Vec<Question>>;
    // 更新题目
    async fn update_question(
        &self,
        id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>>;
    // 删除题目
    async fn delete_question(&self, id: i64) -> Result<bool>;

    /// 房间管理方法
    // 创建房间，room_code 由服务层生成并查重
    async fn create_room(
        &self,
        teacher_id: i64,
        room_code: String,
        room: CreateRoomRequest,
        expires_at: i64,
    ) -> Result<Room>;
    // 通过ID获取房间
    async fn get_room_by_id(&self, id: i64) -> Result<Option<Room>>;
    // 通过房间码获取房间
    async fn get_room_by_code(&self, room_code: &str) -> Result<Option<Room>>;
    // 列出房间
    async fn list_rooms_with_pagination(&self, query: RoomListQuery) -> Result<RoomListResponse>;
    // 更新房间
    async fn update_room(&self, id: i64, update: UpdateRoomRequest) -> Result<Option<Room>>;
    // 更新房间状态，active/closed 首次流转时顺带记录起止时间
    async fn update_room_status(&self, id: i64, status: RoomStatus) -> Result<Option<Room>>;
    // 向房间追加题目（去重）
    async fn add_questions_to_room(&self, id: i64, question_ids: &[i64]) -> Result<Option<Room>>;
    // participant 计数加一
    async fn increment_room_participants(&self, room_id: i64) -> Result<bool>;
    // 记录一次提交并刷新平均分
    async fn record_room_submission(&self, room_id: i64, average_score: f64) -> Result<bool>;
    // 人工批改后仅刷新平均分，不增加提交计数
    async fn update_room_average(&self, room_id: i64, average_score: f64) -> Result<bool>;
    // 删除房间，级联删除其下答卷
    async fn delete_room(&self, id: i64) -> Result<bool>;
    // 清理过期房间，返回删除数量
    async fn delete_expired_rooms(&self, now: i64) -> Result<u64>;

    /// 答卷管理方法
    // 学生加入房间时创建答卷
    async fn create_response(
        &self,
        room_id: i64,
        student_info: StudentInfo,
        answers: Vec<ResponseAnswer>,
        max_score: f64,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<StudentResponse>;
    // 通过ID获取答卷
    async fn get_response_by_id(&self, id: i64) -> Result<Option<StudentResponse>>;
    // 保存作答进度
    async fn update_response_progress(
        &self,
        id: i64,
        update: UpdateResponseRequest,
    ) -> Result<Option<StudentResponse>>;
    // 条件交卷，只有 in-progress 状态会被更新，返回是否更新成功
    async fn submit_response(
        &self,
        id: i64,
        answers: Vec<ResponseAnswer>,
        total_score: f64,
        percentage: f64,
        total_time_spent: i64,
    ) -> Result<bool>;
    // 保存人工批改结果并置为 reviewed
    async fn save_response_grades(
        &self,
        id: i64,
        answers: Vec<ResponseAnswer>,
        total_score: f64,
        percentage: f64,
    ) -> Result<Option<StudentResponse>>;
    // 列出房间答卷，可按状态过滤
    async fn list_responses_by_room(
        &self,
        room_id: i64,
        status: Option<ResponseStatus>,
    ) -> Result<Vec<StudentResponse>>;
    // 统计房间答卷数量（全部状态，用于容量判断）
    async fn count_responses_by_room(&self, room_id: i64) -> Result<u64>;
    // 删除答卷
    async fn delete_response(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
