//! # Application Error Handling
//!
//! user-api 전역에서 사용하는 에러 타입입니다.
//! 모든 서비스와 리포지토리는 [`AppResult`]를 반환하고, 핸들러에서 `?`로 전파된 에러는
//! [`actix_web::ResponseError`] 구현을 통해 일관된 JSON 응답으로 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 필수 필드 누락, 잘못된 ID 형식 |
//! | `AuthenticationError` | 401 Unauthorized | 토큰 누락/만료, OAuth state 불일치 |
//! | `AuthorizationError` | 403 Forbidden | 비활성화된 계정 |
//! | `NotFound` | 404 Not Found | 존재하지 않거나 탈퇴한 사용자 |
//! | `ConflictError` | 409 Conflict | 이메일, (provider, provider_id) 중복 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | OAuth 제공자, catalog-api 호출 실패 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "Not found: 사용자를 찾을 수 없습니다" }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Error`/`Display`를 구현하고, 각 변형은 하나의 HTTP 상태 코드에 대응합니다.
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// // MongoDB 에러 변환
/// collection.find_one(filter).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
///
/// // OAuth 제공자 호출 실패
/// client.post(&token_uri).form(&params).send().await
///     .map_err(|e| AppError::ExternalServiceError(format!("토큰 요청 실패: {}", e)))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400)
    ///
    /// # 발생 시나리오
    /// - dev-login 요청에 이메일/닉네임 누락
    /// - 프로필 수정 시 공백 닉네임
    /// - ObjectId로 해석할 수 없는 사용자 ID
    /// - 설정되지 않은 OAuth 제공자
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409)
    ///
    /// 유니크 제약(이메일, provider + provider_id) 위반 시 발생합니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401)
    ///
    /// # 발생 시나리오
    /// - Authorization 헤더 누락 또는 Bearer 형식 아님
    /// - 서명이 맞지 않거나 만료된 JWT
    /// - 알 수 없거나 만료된 OAuth state
    /// - 제공자가 인증을 거부한 콜백
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 에러 (500)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.http_status()
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 서버 로그에 남기고, 클라이언트에는 `{"error": ...}` 형식으로 전달합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.http_status();

        if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", status, self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 `AppError::InternalError`로 변환하는 확장 trait
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// let millis = SystemTime::now().duration_since(UNIX_EPOCH)
///     .context("시스템 시간 계산 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
