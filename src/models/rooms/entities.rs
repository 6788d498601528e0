use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 房间状态
//
// draft 与 active/closed 由教师显式流转，expired 不入库，
// 由 expires_at 与当前时间比较得出。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub enum RoomStatus {
    Draft,
    Active,
    Closed,
}

impl RoomStatus {
    pub const DRAFT: &'static str = "draft";
    pub const ACTIVE: &'static str = "active";
    pub const CLOSED: &'static str = "closed";

    /// 仅允许 draft -> active 与 active -> closed
    pub fn can_transition_to(&self, target: RoomStatus) -> bool {
        matches!(
            (self, target),
            (RoomStatus::Draft, RoomStatus::Active) | (RoomStatus::Active, RoomStatus::Closed)
        )
    }
}

impl<'de> Deserialize<'de> for RoomStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<RoomStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的房间状态: '{s}'. 支持的状态: draft, active, closed"
            ))
        })
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomStatus::Draft => write!(f, "{}", RoomStatus::DRAFT),
            RoomStatus::Active => write!(f, "{}", RoomStatus::ACTIVE),
            RoomStatus::Closed => write!(f, "{}", RoomStatus::CLOSED),
        }
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(RoomStatus::Draft),
            "active" => Ok(RoomStatus::Active),
            "closed" => Ok(RoomStatus::Closed),
            _ => Err(format!("Invalid room status: {s}")),
        }
    }
}

// 学生加入时必须填写的身份字段
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct RequiredFields {
    #[serde(default = "default_true")]
    pub name: bool,
    #[serde(default)]
    pub lrn: bool,
    #[serde(default)]
    pub section: bool,
    #[serde(default)]
    pub email: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RequiredFields {
    fn default() -> Self {
        RequiredFields {
            name: true,
            lrn: false,
            section: false,
            email: false,
        }
    }
}

// 房间设置
//
// time_limit 单位为分钟，0 表示不限时；max_students 为 0 表示不限人数。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct RoomSettings {
    #[serde(default)]
    pub time_limit: i64,
    #[serde(default)]
    pub shuffle_questions: bool,
    #[serde(default)]
    pub shuffle_choices: bool,
    #[serde(default)]
    pub show_results_immediately: bool,
    #[serde(default = "default_true")]
    pub allow_review: bool,
    #[serde(default)]
    pub max_students: i64,
    #[serde(default)]
    pub required_fields: RequiredFields,
}

impl Default for RoomSettings {
    fn default() -> Self {
        RoomSettings {
            time_limit: 0,
            shuffle_questions: false,
            shuffle_choices: false,
            show_results_immediately: false,
            allow_review: true,
            max_students: 0,
            required_fields: RequiredFields::default(),
        }
    }
}

// 房间统计
//
// average_score 为已提交与已批阅答卷的百分比均值，每次提交后整体重算。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct RoomStats {
    pub total_participants: i64,
    pub total_submissions: i64,
    pub average_score: f64,
}

// 测验房间实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct Room {
    pub id: i64,
    pub teacher_id: i64,
    pub room_code: String,
    pub title: String,
    pub description: Option<String>,
    pub question_ids: Vec<i64>,
    pub settings: RoomSettings,
    pub status: RoomStatus,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub stats: RoomStats,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Room {
    /// 过期房间对外等同于不存在
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now > self.expires_at
    }

    /// 学生是否还能加入，participant_count 以存储层实时计数为准
    pub fn has_capacity(&self, participant_count: i64) -> bool {
        self.settings.max_students <= 0 || participant_count < self.settings.max_students
    }

    pub fn is_joinable(&self, now: chrono::DateTime<chrono::Utc>, participant_count: i64) -> bool {
        self.status == RoomStatus::Active
            && !self.is_expired(now)
            && self.has_capacity(participant_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample_room(status: RoomStatus, max_students: i64) -> Room {
        let now = Utc::now();
        Room {
            id: 1,
            teacher_id: 1,
            room_code: "AB12CD".to_string(),
            title: "Cell Division Quiz".to_string(),
            description: None,
            question_ids: vec![1, 2, 3],
            settings: RoomSettings {
                max_students,
                ..RoomSettings::default()
            },
            status,
            start_date: None,
            end_date: None,
            expires_at: now + Duration::hours(24),
            stats: RoomStats::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_transitions() {
        assert!(RoomStatus::Draft.can_transition_to(RoomStatus::Active));
        assert!(RoomStatus::Active.can_transition_to(RoomStatus::Closed));

        assert!(!RoomStatus::Draft.can_transition_to(RoomStatus::Closed));
        assert!(!RoomStatus::Active.can_transition_to(RoomStatus::Draft));
        assert!(!RoomStatus::Closed.can_transition_to(RoomStatus::Active));
        assert!(!RoomStatus::Closed.can_transition_to(RoomStatus::Draft));
        assert!(!RoomStatus::Draft.can_transition_to(RoomStatus::Draft));
        assert!(!RoomStatus::Closed.can_transition_to(RoomStatus::Closed));
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for s in ["draft", "active", "closed"] {
            let status = s.parse::<RoomStatus>().unwrap();
            assert_eq!(status.to_string(), s);
        }
        assert!("expired".parse::<RoomStatus>().is_err());
    }

    #[test]
    fn test_expiry_is_time_driven() {
        let now = Utc::now();
        let mut room = sample_room(RoomStatus::Active, 0);
        assert!(!room.is_expired(now));

        room.expires_at = now - Duration::seconds(1);
        assert!(room.is_expired(now));
        // 入库状态不变，过期完全由时间推导
        assert_eq!(room.status, RoomStatus::Active);
    }

    #[test]
    fn test_capacity_zero_means_unlimited() {
        let room = sample_room(RoomStatus::Active, 0);
        assert!(room.has_capacity(0));
        assert!(room.has_capacity(10_000));

        let limited = sample_room(RoomStatus::Active, 2);
        assert!(limited.has_capacity(0));
        assert!(limited.has_capacity(1));
        assert!(!limited.has_capacity(2));
        assert!(!limited.has_capacity(3));
    }

    #[test]
    fn test_joinable_requires_active_status() {
        let now = Utc::now();
        assert!(sample_room(RoomStatus::Active, 0).is_joinable(now, 0));
        assert!(!sample_room(RoomStatus::Draft, 0).is_joinable(now, 0));
        assert!(!sample_room(RoomStatus::Closed, 0).is_joinable(now, 0));

        let mut expired = sample_room(RoomStatus::Active, 0);
        expired.expires_at = now - Duration::hours(1);
        assert!(!expired.is_joinable(now, 0));

        let full = sample_room(RoomStatus::Active, 5);
        assert!(!full.is_joinable(now, 5));
    }

    #[test]
    fn test_settings_defaults() {
        let settings: RoomSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.time_limit, 0);
        assert!(!settings.shuffle_questions);
        assert!(!settings.shuffle_choices);
        assert!(!settings.show_results_immediately);
        assert!(settings.allow_review);
        assert_eq!(settings.max_students, 0);
        assert!(settings.required_fields.name);
        assert!(!settings.required_fields.lrn);
        assert!(!settings.required_fields.section);
        assert!(!settings.required_fields.email);
    }
}
