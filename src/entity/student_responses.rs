//! 学生答卷实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub room_id: i64,
    pub student_name: String,
    pub student_lrn: Option<String>,
    pub student_section: Option<String>,
    pub student_email: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub status: String,
    pub started_at: i64,
    pub submitted_at: Option<i64>,
    pub total_time_spent: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rooms::Entity",
        from = "Column::RoomId",
        to = "super::rooms::Column::Id"
    )]
    Room,
}

impl Related<super::rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
// answers 以 JSON 文本存储，解析失败时回退为空列表
impl Model {
    pub fn into_response(self) -> crate::models::responses::entities::StudentResponse {
        use crate::models::responses::entities::{
            ResponseStatus, StudentInfo, StudentResponse,
        };
        use chrono::{DateTime, Utc};

        StudentResponse {
            id: self.id,
            room_id: self.room_id,
            student_info: StudentInfo {
                name: self.student_name,
                lrn: self.student_lrn,
                section: self.student_section,
                email: self.student_email,
            },
            answers: serde_json::from_str(&self.answers).unwrap_or_default(),
            total_score: self.total_score,
            max_score: self.max_score,
            percentage: self.percentage,
            status: self
                .status
                .parse::<ResponseStatus>()
                .unwrap_or(ResponseStatus::InProgress),
            started_at: DateTime::<Utc>::from_timestamp(self.started_at, 0).unwrap_or_default(),
            submitted_at: self
                .submitted_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            total_time_spent: self.total_time_spent,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
