//! # User HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `GET` | `/api/users/me` | 필수 | 내 프로필 |
//! | `PUT` | `/api/users/me` | 필수 | 내 프로필 수정 (보낸 필드만) |
//! | `DELETE` | `/api/users/me` | 필수 | 회원 탈퇴 |
//! | `GET` | `/api/users/{user_id}` | - | 공개 프로필 |
//!
//! 탈퇴한 계정의 토큰으로 `/me`를 호출하면 404, 비활성화된 계정은 403입니다.
//! 공개 프로필은 탈퇴한 사용자를 익명화된 값으로 보여줍니다.

use actix_web::{delete, get, put, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::{AuthenticatedUser, UpdateUserRequest, UserResponse};
use crate::services::users::UserService;

#[get("")]
pub async fn get_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let me = UserService::instance().get_active_user(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(me)))
}

#[put("")]
pub async fn update_me(
    user: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let updated = UserService::instance()
        .update_user(&user.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

#[delete("")]
pub async fn delete_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    UserService::instance().delete_user(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "회원 탈퇴가 완료되었습니다." })))
}

#[get("/{user_id}")]
pub async fn get_user(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let profile = UserService::instance()
        .get_public_profile(&user_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("존재하지 않는 사용자입니다.".to_string()),
            other => other,
        })?;

    Ok(HttpResponse::Ok().json(profile))
}
