//! 개발용 사용자 관리 핸들러
//!
//! `DevToolsConfig::enabled()`일 때만 `/api/dev`에 등록됩니다.
//! 인증 없이 사용자를 만들고 지울 수 있으므로 운영 환경에서는 노출하지 않습니다.

use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::{CreateDevUserRequest, UserResponse};
use crate::services::{auth::TokenService, users::UserService};

/// 개발용 사용자를 만들고(또는 같은 이메일의 사용자를 재사용하고) 바로 토큰을 발급합니다.
#[post("/create-user")]
pub async fn create_user(
    payload: Option<web::Json<CreateDevUserRequest>>,
) -> Result<HttpResponse, AppError> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    request.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = UserService::instance()
        .create_dev_user(request.email, request.nickname)
        .await?;
    let response = TokenService::instance().login_response(&user)?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/users")]
pub async fn list_users() -> Result<HttpResponse, AppError> {
    let users: Vec<UserResponse> = UserService::instance()
        .list_users()
        .await?
        .iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// 사용자 문서를 영구 삭제합니다. 회원 탈퇴와 달리 catalog-api 정리 요청을 보내지 않습니다.
#[delete("/users/{user_id}")]
pub async fn delete_user(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    UserService::instance().hard_delete_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "사용자가 삭제되었습니다." })))
}
