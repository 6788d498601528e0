use super::entities::StudentInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生加入房间时创建答卷
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct CreateResponseRequest {
    pub room_id: i64,
    pub student_info: StudentInfo,
}

// 客户端回传的单题作答，判分字段由服务端计算，不接受客户端提交
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct AnswerInput {
    pub question_id: i64,
    #[ts(type = "unknown")]
    pub answer: serde_json::Value,
    #[serde(default)]
    pub time_spent: i64,
}

// 保存作答进度请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct UpdateResponseRequest {
    pub answers: Option<Vec<AnswerInput>>,
    pub total_time_spent: Option<i64>,
}

// 交卷请求，answers 缺省时按已保存的进度判分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct SubmitResponseRequest {
    pub answers: Option<Vec<AnswerInput>>,
    pub total_time_spent: Option<i64>,
}

// 教师人工批改单题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct AnswerGrade {
    pub question_id: i64,
    pub is_correct: bool,
    pub points_earned: f64,
}

// 人工批改请求，只覆盖列出的题目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct GradeResponseRequest {
    pub answers: Vec<AnswerGrade>,
}

// 房间答卷列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct RoomResponsesQuery {
    pub status: Option<String>,
}
