//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod questions;
mod responses;
mod rooms;
mod users;

use crate::config::AppConfig;
use crate::errors::{QuizRoomError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| QuizRoomError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| QuizRoomError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| QuizRoomError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(QuizRoomError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    auth::requests::UpdateProfileRequest,
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>> {
        self.update_user_profile_impl(id, update).await
    }

    async fn update_user_password(&self, id: i64, password_hash: String) -> Result<bool> {
        self.update_user_password_impl(id, password_hash).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 题库模块
    async fn create_question(
        &self,
        teacher_id: i64,
        question: CreateQuestionRequest,
    ) -> Result<Question> {
        self.create_question_impl(teacher_id, question).await
    }

    async fn get_question_by_id(&self, id: i64) -> Result<Option<Question>> {
        self.get_question_by_id_impl(id).await
    }

    async fn list_questions_with_pagination(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse> {
        self.list_questions_with_pagination_impl(query).await
    }

    async fn list_questions_by_topic(
        &self,
        teacher_id: i64,
        topic: QuestionTopic,
    ) -> Result<Vec<Question>> {
        self.list_questions_by_topic_impl(teacher_id, topic).await
    }

    async fn get_questions_by_ids(&self, ids: &[i64]) -> Result<Vec<Question>> {
        self.get_questions_by_ids_impl(ids).await
    }

    async fn update_question(
        &self,
        id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        self.update_question_impl(id, update).await
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        self.delete_question_impl(id).await
    }

    // 房间模块
    async fn create_room(
        &self,
        teacher_id: i64,
        room_code: String,
        room: CreateRoomRequest,
        expires_at: i64,
    ) -> Result<Room> {
        self.create_room_impl(teacher_id, room_code, room, expires_at)
            .await
    }

    async fn get_room_by_id(&self, id: i64) -> Result<Option<Room>> {
        self.get_room_by_id_impl(id).await
    }

    async fn get_room_by_code(&self, room_code: &str) -> Result<Option<Room>> {
        self.get_room_by_code_impl(room_code).await
    }

    async fn list_rooms_with_pagination(&self, query: RoomListQuery) -> Result<RoomListResponse> {
        self.list_rooms_with_pagination_impl(query).await
    }

    async fn update_room(&self, id: i64, update: UpdateRoomRequest) -> Result<Option<Room>> {
        self.update_room_impl(id, update).await
    }

    async fn update_room_status(&self, id: i64, status: RoomStatus) -> Result<Option<Room>> {
        self.update_room_status_impl(id, status).await
    }

    async fn add_questions_to_room(&self, id: i64, question_ids: &[i64]) -> Result<Option<Room>> {
        self.add_questions_to_room_impl(id, question_ids).await
    }

    async fn increment_room_participants(&self, room_id: i64) -> Result<bool> {
        self.increment_room_participants_impl(room_id).await
    }

    async fn record_room_submission(&self, room_id: i64, average_score: f64) -> Result<bool> {
        self.record_room_submission_impl(room_id, average_score)
            .await
    }

    async fn update_room_average(&self, room_id: i64, average_score: f64) -> Result<bool> {
        self.update_room_average_impl(room_id, average_score).await
    }

    async fn delete_room(&self, id: i64) -> Result<bool> {
        self.delete_room_impl(id).await
    }

    async fn delete_expired_rooms(&self, now: i64) -> Result<u64> {
        self.delete_expired_rooms_impl(now).await
    }

    // 答卷模块
    async fn create_response(
        &self,
        room_id: i64,
        student_info: StudentInfo,
        answers: Vec<ResponseAnswer>,
        max_score: f64,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<StudentResponse> {
        self.create_response_impl(
            room_id,
            student_info,
            answers,
            max_score,
            ip_address,
            user_agent,
        )
        .await
    }

    async fn get_response_by_id(&self, id: i64) -> Result<Option<StudentResponse>> {
        self.get_response_by_id_impl(id).await
    }

    async fn update_response_progress(
        &self,
        id: i64,
        update: UpdateResponseRequest,
    ) -> Result<Option<StudentResponse>> {
        self.update_response_progress_impl(id, update).await
    }

    async fn submit_response(
        &self,
        id: i64,
        answers: Vec<ResponseAnswer>,
        total_score: f64,
        percentage: f64,
        total_time_spent: i64,
    ) -> Result<bool> {
        self.submit_response_impl(id, answers, total_score, percentage, total_time_spent)
            .await
    }

    async fn save_response_grades(
        &self,
        id: i64,
        answers: Vec<ResponseAnswer>,
        total_score: f64,
        percentage: f64,
    ) -> Result<Option<StudentResponse>> {
        self.save_response_grades_impl(id, answers, total_score, percentage)
            .await
    }

    async fn list_responses_by_room(
        &self,
        room_id: i64,
        status: Option<ResponseStatus>,
    ) -> Result<Vec<StudentResponse>> {
        self.list_responses_by_room_impl(room_id, status).await
    }

    async fn count_responses_by_room(&self, room_id: i64) -> Result<u64> {
        self.count_responses_by_room_impl(room_id).await
    }

    async fn delete_response(&self, id: i64) -> Result<bool> {
        self.delete_response_impl(id).await
    }
}
