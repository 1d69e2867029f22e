//! # Authentication HTTP Handlers
//!
//! 로그인 관련 엔드포인트입니다. 모든 로그인 경로는 같은 [`LoginResponse`] 형식으로 응답합니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/auth/dev-login` | 이메일/닉네임 개발용 로그인 |
//! | `GET` | `/api/auth/login/{provider}` | 인가 엔드포인트 안내 |
//! | `GET` | `/api/auth/oauth2/{provider}/authorize` | 인가 URL과 state 발급 |
//! | `GET` | `/api/auth/oauth2/{provider}/callback` | 코드 교환 후 로그인 |
//! | `POST` | `/api/auth/logout` | 로그아웃 (stateless) |
//!
//! ## 소셜 로그인 흐름 (모바일 앱)
//!
//! ```text
//! App ── GET /oauth2/naver/authorize?baseUrl=... ──▶ {authUrl, state}
//! App ── 브라우저로 authUrl 열기 ──▶ Naver 로그인
//! Naver ── redirect ──▶ GET /oauth2/naver/callback?code&state
//!                              └─▶ LoginResponse {accessToken, user}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::{
    config::AuthProvider,
    core::errors::AppError,
    domain::{AuthorizeQuery, DevLoginRequest, LoginUrlResponse, OAuthCallbackQuery, OptionalUser},
    services::{
        auth::{OAuthService, TokenService},
        users::UserService,
    },
};

/// 경로의 제공자 이름을 OAuth 제공자로 변환합니다. `dev`는 OAuth 제공자가 아닙니다.
fn parse_oauth_provider(provider: &str) -> Result<AuthProvider, AppError> {
    AuthProvider::from_str(provider)
        .ok()
        .filter(AuthProvider::is_oauth)
        .ok_or_else(|| AppError::ValidationError(format!("지원하지 않는 OAuth2 제공자입니다: {}", provider)))
}

#[post("/dev-login")]
pub async fn dev_login(
    payload: web::Json<DevLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (email, nickname) = match (payload.email.as_deref(), payload.nickname.as_deref()) {
        (Some(email), Some(nickname)) => (email, nickname),
        _ => return Err(AppError::ValidationError("이메일과 닉네임이 필요합니다".to_string())),
    };

    log::info!("개발용 로그인 요청: email={}, nickname={}", email, nickname);

    let user = UserService::instance().process_dev_user(email, nickname).await?;
    let response = TokenService::instance().login_response(&user)?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/login/{provider}")]
pub async fn login_url(
    provider: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_oauth_provider(&provider)?;

    Ok(HttpResponse::Ok().json(LoginUrlResponse {
        login_url: format!("/api/auth/oauth2/{}/authorize", provider.as_str()),
        message: format!("{} 로그인 URL입니다.", provider),
    }))
}

#[get("/oauth2/{provider}/authorize")]
pub async fn authorize(
    provider: web::Path<String>,
    query: web::Query<AuthorizeQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let provider = parse_oauth_provider(&provider)?;
    let response = OAuthService::instance().authorization_url(&provider, query.base_url.as_deref())?;

    Ok(HttpResponse::Ok().json(response))
}

/// 제공자 콜백
///
/// 사용자가 동의를 거부하면 제공자가 `error`를 담아 돌려보내며, 이 경우 401입니다.
#[get("/oauth2/{provider}/callback")]
pub async fn callback(
    provider: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_oauth_provider(&provider)?;

    if let Some(error) = &query.error {
        let error_msg = query.error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("{} OAuth 에러: {} - {}", provider, error, error_msg);
        return Err(AppError::AuthenticationError(error_msg.to_string()));
    }

    let (code, state) = match (query.code.as_deref(), query.state.as_deref()) {
        (Some(code), Some(state)) if !code.is_empty() && !state.is_empty() => (code, state),
        _ => return Err(AppError::ValidationError("code와 state가 필요합니다".to_string())),
    };

    let profile = OAuthService::instance().authenticate(&provider, code, state).await?;
    let user = UserService::instance().process_oauth_user(&provider, profile).await?;
    let response = TokenService::instance().login_response(&user)?;

    log::info!("{} 로그인 성공: {}", provider, user.email);
    Ok(HttpResponse::Ok().json(response))
}

/// JWT는 서버에 저장하지 않으므로 클라이언트가 토큰을 버리면 로그아웃됩니다.
#[post("")]
pub async fn logout(user: OptionalUser) -> HttpResponse {
    if let Some(user) = user.0 {
        log::info!("로그아웃: 사용자 ID {}", user.user_id);
    }

    HttpResponse::Ok().json(json!({ "message": "로그아웃되었습니다." }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};
    use crate::domain::LoginResponse;
    use crate::handlers::test_support::use_memory_store;
    use crate::middlewares::AuthMiddleware;

    #[test]
    fn test_parse_oauth_provider() {
        assert_eq!(parse_oauth_provider("google").unwrap(), AuthProvider::Google);
        assert_eq!(parse_oauth_provider("NAVER").unwrap(), AuthProvider::Naver);
        assert!(matches!(parse_oauth_provider("dev"), Err(AppError::ValidationError(_))));
        assert!(matches!(parse_oauth_provider("kakao"), Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_dev_login_issues_token() {
        use_memory_store();
        let app = actix_test::init_service(App::new().service(web::scope("/api/auth").service(dev_login))).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/auth/dev-login")
            .set_json(json!({ "email": "dev-login@test.com", "nickname": "개발자" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: LoginResponse = actix_test::read_body_json(resp).await;
        assert_eq!(body.token_type, "Bearer");
        assert_eq!(body.user.email, "dev-login@test.com");
        assert_eq!(TokenService::instance().get_user_id(&body.access_token).unwrap(), body.user.id);
    }

    #[actix_web::test]
    async fn test_dev_login_requires_email_and_nickname() {
        use_memory_store();
        let app = actix_test::init_service(App::new().service(web::scope("/api/auth").service(dev_login))).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/auth/dev-login")
            .set_json(json!({ "email": "only-email@test.com" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert!(body["error"].as_str().is_some());
    }

    #[actix_web::test]
    async fn test_login_url_points_at_authorize() {
        let app = actix_test::init_service(App::new().service(web::scope("/api/auth").service(login_url))).await;

        let req = actix_test::TestRequest::get().uri("/api/auth/login/naver").to_request();
        let body: LoginUrlResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.login_url, "/api/auth/oauth2/naver/authorize");
        assert_eq!(body.message, "naver 로그인 URL입니다.");

        let req = actix_test::TestRequest::get().uri("/api/auth/login/kakao").to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_callback_with_provider_error_is_unauthorized() {
        let app = actix_test::init_service(App::new().service(web::scope("/api/auth").service(callback))).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/auth/oauth2/google/callback?error=access_denied&error_description=denied")
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn test_callback_without_code_is_bad_request() {
        let app = actix_test::init_service(App::new().service(web::scope("/api/auth").service(callback))).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/auth/oauth2/google/callback?state=abc")
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_logout_is_stateless() {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/api/auth/logout")
                    .wrap(AuthMiddleware::optional())
                    .service(logout)
            )
        ).await;

        let req = actix_test::TestRequest::post().uri("/api/auth/logout").to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "로그아웃되었습니다.");

        let token = TokenService::instance().create_token("65f0c0ffee00000000000009").unwrap();
        let req = actix_test::TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 200);
    }
}
