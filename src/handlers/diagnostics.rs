//! 토큰 진단용 핸들러 (`/api/test`)
//!
//! catalog-api 연동을 확인할 때 사용합니다. 개발용 엔드포인트와 함께 등록됩니다.

use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::{
    CreateTestTokenRequest, LoginResponse, TokenValidationResponse, User, UserResponse, ValidateTokenRequest,
};
use crate::services::auth::TokenService;
use crate::utils::string_utils::clean_optional_string;

/// 토큰 발급 테스트용 가상 사용자 ID
pub const MOCK_USER_ID: &str = "000000000000000000000001";

/// 저장소를 거치지 않고 가상 사용자에 대한 토큰을 발급합니다.
#[post("/create-token")]
pub async fn create_token(
    payload: Option<web::Json<CreateTestTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();

    let email = clean_optional_string(request.email).unwrap_or_else(|| "test@example.com".to_string());
    let nickname = clean_optional_string(request.nickname).unwrap_or_else(|| "테스트사용자".to_string());

    let mut mock_user = User::new_dev(email, nickname);
    mock_user.id = ObjectId::parse_str(MOCK_USER_ID).ok();
    mock_user.introduction = Some("테스트 사용자입니다.".to_string());

    let token_service = TokenService::instance();
    let access_token = token_service.create_token(MOCK_USER_ID)?;

    Ok(HttpResponse::Ok().json(LoginResponse::new(
        UserResponse::from(&mock_user),
        access_token,
        token_service.token_validity_seconds(),
    )))
}

#[get("/health")]
pub async fn test_health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "UP",
        "message": "User API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 토큰이 없으면 400, 있으면 유효 여부와 관계없이 200으로 결과를 알려줍니다.
#[post("/validate-token")]
pub async fn validate_token(
    payload: Option<web::Json<ValidateTokenRequest>>,
) -> HttpResponse {
    let token = payload
        .and_then(|body| body.into_inner().token)
        .filter(|token| !token.trim().is_empty());

    let Some(token) = token else {
        return HttpResponse::BadRequest().json(TokenValidationResponse {
            valid: false,
            user_id: None,
            message: "토큰이 제공되지 않았습니다.".to_string(),
        });
    };

    let response = match TokenService::instance().verify_token(token.trim()) {
        Ok(claims) => TokenValidationResponse {
            valid: true,
            user_id: Some(claims.sub),
            message: "유효한 토큰입니다.".to_string(),
        },
        Err(_) => TokenValidationResponse {
            valid: false,
            user_id: None,
            message: "유효하지 않은 토큰입니다.".to_string(),
        },
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    macro_rules! diagnostics_app {
        () => {
            test::init_service(
                App::new().service(
                    web::scope("/api/test")
                        .service(create_token)
                        .service(test_health)
                        .service(validate_token)
                )
            ).await
        };
    }

    #[actix_web::test]
    async fn test_create_token_for_mock_user() {
        let app = diagnostics_app!();

        let req = test::TestRequest::post()
            .uri("/api/test/create-token")
            .set_json(json!({ "nickname": "검증용" }))
            .to_request();
        let body: LoginResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.user.id, MOCK_USER_ID);
        assert_eq!(body.user.email, "test@example.com");
        assert_eq!(body.user.nickname, "검증용");
        assert_eq!(body.expires_in, TokenService::instance().token_validity_seconds());
        assert_eq!(TokenService::instance().get_user_id(&body.access_token).unwrap(), MOCK_USER_ID);
    }

    #[actix_web::test]
    async fn test_validate_token_round_trip() {
        let app = diagnostics_app!();
        let token = TokenService::instance().create_token("65f0c0ffee00000000000003").unwrap();

        let req = test::TestRequest::post()
            .uri("/api/test/validate-token")
            .set_json(json!({ "token": token }))
            .to_request();
        let body: TokenValidationResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.valid);
        assert_eq!(body.user_id.as_deref(), Some("65f0c0ffee00000000000003"));

        let req = test::TestRequest::post()
            .uri("/api/test/validate-token")
            .set_json(json!({ "token": "garbage" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], false);
        assert!(body.get("userId").is_none());
    }

    #[actix_web::test]
    async fn test_validate_token_without_token_is_bad_request() {
        let app = diagnostics_app!();

        let req = test::TestRequest::post()
            .uri("/api/test/validate-token")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "토큰이 제공되지 않았습니다.");
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = diagnostics_app!();

        let req = test::TestRequest::get().uri("/api/test/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "UP");
        assert!(body["timestamp"].is_string());
    }
}
