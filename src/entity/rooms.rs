//! 测验房间实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    #[sea_orm(unique)]
    pub room_code: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub question_ids: String,
    #[sea_orm(column_type = "Text")]
    pub settings: String,
    pub status: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub expires_at: i64,
    pub total_participants: i64,
    pub total_submissions: i64,
    pub average_score: f64,
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
    #[sea_orm(has_many = "super::student_responses::Entity")]
    StudentResponses,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::student_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentResponses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
// question_ids 与 settings 以 JSON 文本存储，解析失败时回退为默认值
impl Model {
    pub fn into_room(self) -> crate::models::rooms::entities::Room {
        use crate::models::rooms::entities::{Room, RoomStats, RoomStatus};
        use chrono::{DateTime, Utc};

        Room {
            id: self.id,
            teacher_id: self.teacher_id,
            room_code: self.room_code,
            title: self.title,
            description: self.description,
            question_ids: serde_json::from_str(&self.question_ids).unwrap_or_default(),
            settings: serde_json::from_str(&self.settings).unwrap_or_default(),
            status: self
                .status
                .parse::<RoomStatus>()
                .unwrap_or(RoomStatus::Draft),
            start_date: self
                .start_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            end_date: self
                .end_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            expires_at: DateTime::<Utc>::from_timestamp(self.expires_at, 0).unwrap_or_default(),
            stats: RoomStats {
                total_participants: self.total_participants,
                total_submissions: self.total_submissions,
                average_score: self.average_score,
            },
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
