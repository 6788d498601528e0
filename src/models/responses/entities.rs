use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 答卷状态
//
// in-progress 可反复保存，submitted 只能发生一次，
// reviewed 允许教师重复批改。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub enum ResponseStatus {
    InProgress,
    Submitted,
    Reviewed,
}

impl ResponseStatus {
    pub const IN_PROGRESS: &'static str = "in-progress";
    pub const SUBMITTED: &'static str = "submitted";
    pub const REVIEWED: &'static str = "reviewed";

    pub fn can_transition_to(&self, target: ResponseStatus) -> bool {
        matches!(
            (self, target),
            (ResponseStatus::InProgress, ResponseStatus::Submitted)
                | (ResponseStatus::Submitted, ResponseStatus::Reviewed)
                | (ResponseStatus::Reviewed, ResponseStatus::Reviewed)
        )
    }

    /// 已提交或已批阅的答卷计入房间统计
    pub fn is_final(&self) -> bool {
        matches!(self, ResponseStatus::Submitted | ResponseStatus::Reviewed)
    }
}

impl<'de> Deserialize<'de> for ResponseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ResponseStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的答卷状态: '{s}'. 支持的状态: in-progress, submitted, reviewed"
            ))
        })
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseStatus::InProgress => write!(f, "{}", ResponseStatus::IN_PROGRESS),
            ResponseStatus::Submitted => write!(f, "{}", ResponseStatus::SUBMITTED),
            ResponseStatus::Reviewed => write!(f, "{}", ResponseStatus::REVIEWED),
        }
    }
}

impl std::str::FromStr for ResponseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-progress" => Ok(ResponseStatus::InProgress),
            "submitted" => Ok(ResponseStatus::Submitted),
            "reviewed" => Ok(ResponseStatus::Reviewed),
            _ => Err(format!("Invalid response status: {s}")),
        }
    }
}

// 学生身份信息，除姓名外均按房间设置选填
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct StudentInfo {
    pub name: String,
    pub lrn: Option<String>,
    pub section: Option<String>,
    pub email: Option<String>,
}

// 单题作答记录
//
// answer 的形态随题型变化（选项 id 字符串、布尔值、配对数组、
// 填空数组或自由文本），序列化时原样保存。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct ResponseAnswer {
    pub question_id: i64,
    #[ts(type = "unknown")]
    pub answer: serde_json::Value,
    pub is_correct: bool,
    pub points_earned: f64,
    pub time_spent: i64,
}

impl ResponseAnswer {
    /// 创建答卷时为每道题预置的空作答
    pub fn blank(question_id: i64) -> Self {
        ResponseAnswer {
            question_id,
            answer: serde_json::Value::Null,
            is_correct: false,
            points_earned: 0.0,
            time_spent: 0,
        }
    }
}

// 学生答卷实体
//
// max_score 在创建时按房间当时的题目总分快照，
// 之后房间换题不影响已有答卷。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct StudentResponse {
    pub id: i64,
    pub room_id: i64,
    pub student_info: StudentInfo,
    pub answers: Vec<ResponseAnswer>,
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub status: ResponseStatus,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub total_time_spent: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(ResponseStatus::InProgress.can_transition_to(ResponseStatus::Submitted));
        assert!(ResponseStatus::Submitted.can_transition_to(ResponseStatus::Reviewed));
        // 批改可以重复进行
        assert!(ResponseStatus::Reviewed.can_transition_to(ResponseStatus::Reviewed));

        assert!(!ResponseStatus::InProgress.can_transition_to(ResponseStatus::Reviewed));
        assert!(!ResponseStatus::Submitted.can_transition_to(ResponseStatus::Submitted));
        assert!(!ResponseStatus::Submitted.can_transition_to(ResponseStatus::InProgress));
        assert!(!ResponseStatus::Reviewed.can_transition_to(ResponseStatus::InProgress));
        assert!(!ResponseStatus::Reviewed.can_transition_to(ResponseStatus::Submitted));
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for s in ["in-progress", "submitted", "reviewed"] {
            let status = s.parse::<ResponseStatus>().unwrap();
            assert_eq!(status.to_string(), s);
        }
        assert!("graded".parse::<ResponseStatus>().is_err());
    }

    #[test]
    fn test_final_states() {
        assert!(!ResponseStatus::InProgress.is_final());
        assert!(ResponseStatus::Submitted.is_final());
        assert!(ResponseStatus::Reviewed.is_final());
    }

    #[test]
    fn test_blank_answer() {
        let answer = ResponseAnswer::blank(42);
        assert_eq!(answer.question_id, 42);
        assert!(answer.answer.is_null());
        assert!(!answer.is_correct);
        assert_eq!(answer.points_earned, 0.0);
        assert_eq!(answer.time_spent, 0);
    }
}
