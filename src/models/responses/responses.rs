use super::entities::{ResponseStatus, StudentResponse};
use serde::Serialize;
use ts_rs::TS;

// 房间答卷汇总统计，均值类指标只统计已提交与已批阅的答卷
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct ResponseAggregateStats {
    pub total: i64,
    pub submitted: i64,
    pub in_progress: i64,
    pub average_score: f64,
    pub average_percentage: f64,
    pub average_time: f64,
}

impl ResponseAggregateStats {
    pub fn from_responses(responses: &[StudentResponse]) -> Self {
        let finals: Vec<&StudentResponse> = responses
            .iter()
            .filter(|r| r.status.is_final())
            .collect();
        let in_progress = responses
            .iter()
            .filter(|r| r.status == ResponseStatus::InProgress)
            .count() as i64;

        let (average_score, average_percentage, average_time) = if finals.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let n = finals.len() as f64;
            (
                finals.iter().map(|r| r.total_score).sum::<f64>() / n,
                finals.iter().map(|r| r.percentage).sum::<f64>() / n,
                finals.iter().map(|r| r.total_time_spent as f64).sum::<f64>() / n,
            )
        };

        ResponseAggregateStats {
            total: responses.len() as i64,
            submitted: finals.len() as i64,
            in_progress,
            average_score,
            average_percentage,
            average_time,
        }
    }
}

// 房间答卷列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct RoomResponsesResponse {
    pub count: i64,
    pub stats: ResponseAggregateStats,
    pub items: Vec<StudentResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::responses::entities::StudentInfo;

    fn sample_response(
        status: ResponseStatus,
        total_score: f64,
        percentage: f64,
        time_spent: i64,
    ) -> StudentResponse {
        let now = chrono::Utc::now();
        StudentResponse {
            id: 1,
            room_id: 1,
            student_info: StudentInfo {
                name: "Juan".to_string(),
                lrn: None,
                section: None,
                email: None,
            },
            answers: vec![],
            total_score,
            max_score: 10.0,
            percentage,
            status,
            started_at: now,
            submitted_at: status.is_final().then_some(now),
            total_time_spent: time_spent,
            ip_address: None,
            user_agent: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_stats_empty() {
        let stats = ResponseAggregateStats::from_responses(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.submitted, 0);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.average_percentage, 0.0);
        assert_eq!(stats.average_time, 0.0);
    }

    #[test]
    fn test_stats_only_counts_final_responses_in_averages() {
        let responses = vec![
            sample_response(ResponseStatus::Submitted, 8.0, 80.0, 120),
            sample_response(ResponseStatus::Reviewed, 6.0, 60.0, 60),
            sample_response(ResponseStatus::InProgress, 999.0, 999.0, 999),
        ];

        let stats = ResponseAggregateStats::from_responses(&responses);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.submitted, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.average_score, 7.0);
        assert_eq!(stats.average_percentage, 70.0);
        assert_eq!(stats.average_time, 90.0);
    }

    #[test]
    fn test_stats_all_in_progress() {
        let responses = vec![
            sample_response(ResponseStatus::InProgress, 0.0, 0.0, 10),
            sample_response(ResponseStatus::InProgress, 0.0, 0.0, 20),
        ];

        let stats = ResponseAggregateStats::from_responses(&responses);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.submitted, 0);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.average_percentage, 0.0);
    }
}
