use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ResponseService;
use crate::grading;
use crate::models::responses::entities::ResponseAnswer;
use crate::models::responses::requests::CreateResponseRequest;
use crate::models::rooms::entities::{Room, RoomStatus};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_email;

/// 学生进入房间时建卷，此时就按房间当前题目快照满分
pub async fn create_response(
    service: &ResponseService,
    request: &HttpRequest,
    response_data: CreateResponseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let room = match storage.get_room_by_id(response_data.room_id).await {
        Ok(Some(room)) => room,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RoomNotFound,
                "Room not found or has expired",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get room: {e}"),
                )),
            );
        }
    };

    if room.is_expired(chrono::Utc::now()) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoomNotFound,
            "Room not found or has expired",
        )));
    }

    if room.status != RoomStatus::Active {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RoomNotActive,
            "Room is not active",
        )));
    }

    match storage.count_responses_by_room(room.id).await {
        Ok(count) => {
            if !room.has_capacity(count as i64) {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::RoomFull,
                    "Room is full",
                )));
            }
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to count room participants: {e}"),
                )),
            );
        }
    }

    if let Err(msg) = validate_student_info(&room, &response_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ResponseInvalid, msg)));
    }

    let questions = match storage.get_questions_by_ids(&room.question_ids).await {
        Ok(questions) => questions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load room questions: {e}"),
                )),
            );
        }
    };

    // 每题一条空作答占位，满分按当下题目快照，之后房间换题不影响本卷
    let answers: Vec<ResponseAnswer> = questions
        .iter()
        .map(|q| ResponseAnswer::blank(q.id))
        .collect();
    let max_score = grading::sum_points(&questions);

    let ip_address = request
        .connection_info()
        .realip_remote_addr()
        .map(String::from);
    let user_agent = request
        .headers()
        .get(actix_web::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    match storage
        .create_response(
            room.id,
            response_data.student_info,
            answers,
            max_score,
            ip_address,
            user_agent,
        )
        .await
    {
        Ok(response) => {
            info!(
                "Response {} created in room {} by student {}",
                response.id, room.id, response.student_info.name
            );

            // 计数失败不影响建卷，容量判断走实时统计
            if let Err(e) = storage.increment_room_participants(room.id).await {
                warn!("Failed to increment participants for room {}: {}", room.id, e);
            }

            Ok(HttpResponse::Created()
                .json(ApiResponse::success(response, "Response created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create response: {e}"),
            )),
        ),
    }
}

/// 按房间设置校验学生身份字段，姓名始终必填
fn validate_student_info(room: &Room, data: &CreateResponseRequest) -> Result<(), String> {
    let info = &data.student_info;
    if info.name.trim().is_empty() {
        return Err("学生姓名不能为空".to_string());
    }

    let required = &room.settings.required_fields;
    if required.lrn && info.lrn.as_deref().is_none_or(|v| v.trim().is_empty()) {
        return Err("该房间要求填写学号".to_string());
    }
    if required.section
        && info.section.as_deref().is_none_or(|v| v.trim().is_empty())
    {
        return Err("该房间要求填写班级".to_string());
    }
    if required.email {
        match info.email.as_deref() {
            Some(email) if !email.trim().is_empty() => {
                validate_email(email).map_err(|e| e.to_string())?;
            }
            _ => return Err("该房间要求填写邮箱".to_string()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::responses::entities::StudentInfo;
    use crate::models::rooms::entities::{RequiredFields, RoomSettings, RoomStats};
    use chrono::{Duration, Utc};

    fn room_with_required(required_fields: RequiredFields) -> Room {
        let now = Utc::now();
        Room {
            id: 1,
            teacher_id: 1,
            room_code: "AB12CD".to_string(),
            title: "Photosynthesis Quiz".to_string(),
            description: None,
            question_ids: vec![1, 2],
            settings: RoomSettings {
                required_fields,
                ..RoomSettings::default()
            },
            status: RoomStatus::Active,
            start_date: None,
            end_date: None,
            expires_at: now + Duration::hours(24),
            stats: RoomStats::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn join_request(name: &str, lrn: Option<&str>, email: Option<&str>) -> CreateResponseRequest {
        CreateResponseRequest {
            room_id: 1,
            student_info: StudentInfo {
                name: name.to_string(),
                lrn: lrn.map(String::from),
                section: None,
                email: email.map(String::from),
            },
        }
    }

    #[test]
    fn test_name_always_required() {
        let room = room_with_required(RequiredFields::default());
        assert!(validate_student_info(&room, &join_request("  ", None, None)).is_err());
        assert!(validate_student_info(&room, &join_request("Juan", None, None)).is_ok());
    }

    #[test]
    fn test_optional_fields_follow_room_settings() {
        let room = room_with_required(RequiredFields {
            name: true,
            lrn: true,
            section: false,
            email: false,
        });
        assert!(validate_student_info(&room, &join_request("Juan", None, None)).is_err());
        assert!(validate_student_info(&room, &join_request("Juan", Some("123456"), None)).is_ok());
    }

    #[test]
    fn test_required_email_must_be_valid() {
        let room = room_with_required(RequiredFields {
            name: true,
            lrn: false,
            section: false,
            email: true,
        });
        assert!(validate_student_info(&room, &join_request("Juan", None, None)).is_err());
        assert!(validate_student_info(&room, &join_request("Juan", None, Some("not-an-email")))
            .is_err());
        assert!(
            validate_student_info(&room, &join_request("Juan", None, Some("juan@school.edu")))
                .is_ok()
        );
    }
}
