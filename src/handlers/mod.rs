//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다.
//! 요청 값을 추출하고 검증한 뒤 서비스에 위임하며, 에러는 `AppError`로 반환해
//! `{"error": "..."}` 형식의 응답으로 변환되게 합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Mobile App, catalog-api)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                           ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                      ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - UserStore                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 개발용 로그인, OAuth 인가/콜백, 로그아웃
//! - [`users`] - 내 프로필 조회/수정/탈퇴, 공개 프로필
//! - [`dev`] - 개발용 사용자 생성/목록/영구 삭제 (개발 환경 전용)
//! - [`diagnostics`] - 토큰 발급/검증 테스트 (개발 환경 전용)
//!
//! ## 핸들러 작성 규칙
//!
//! ```rust,ignore
//! #[put("")]
//! pub async fn update_me(
//!     user: AuthenticatedUser,
//!     payload: web::Json<UpdateUserRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()
//!         .map_err(|e| AppError::ValidationError(e.to_string()))?;
//!
//!     let updated = UserService::instance().update_user(&user.user_id, payload.into_inner()).await?;
//!     Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
//! }
//! ```

pub mod users;
pub mod auth;
pub mod dev;
pub mod diagnostics;
