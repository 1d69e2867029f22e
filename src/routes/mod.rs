//! API 라우트 설정 모듈
//!
//! 엔드포인트를 기능별 스코프로 묶고 인증 미들웨어를 배치합니다.
//!
//! # Route Table
//!
//! | 스코프 | 인증 | 등록 조건 |
//! |--------|------|-----------|
//! | `/health` | - | 항상 |
//! | `/api/auth` | - (`/logout`만 선택적) | 항상 |
//! | `/api/users/me` | 필수 | 항상 |
//! | `/api/users/{user_id}` | - | 항상 |
//! | `/api/dev` | - | `DevToolsConfig::enabled()` |
//! | `/api/test` | - | `DevToolsConfig::enabled()` |
//!
//! # Auth Middleware Usage
//!
//! `/api/users/me` 스코프는 `/{user_id}`보다 먼저 등록해야 `me`가 ID로 해석되지 않습니다.
//!
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/users")
//!         .service(
//!             web::scope("/me")
//!                 .wrap(AuthMiddleware::required())
//!                 .service(handlers::users::get_me)
//!         )
//!         .service(handlers::users::get_user)
//! );
//! ```

use crate::config::DevToolsConfig;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_routes(cfg, DevToolsConfig::enabled());
}

/// 개발용 스코프 등록 여부를 직접 지정해 라우트를 구성합니다.
pub fn configure_routes(cfg: &mut web::ServiceConfig, dev_tools_enabled: bool) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);

    if dev_tools_enabled {
        configure_dev_routes(cfg);
    }
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(handlers::auth::dev_login)
            .service(handlers::auth::login_url)
            .service(handlers::auth::authorize)
            .service(handlers::auth::callback)
            .service(
                web::scope("/logout")
                    .wrap(AuthMiddleware::optional())
                    .service(handlers::auth::logout)
            )
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .service(
                web::scope("/me")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::users::get_me)
                    .service(handlers::users::update_me)
                    .service(handlers::users::delete_me)
            )
            .service(handlers::users::get_user)
    );
}

fn configure_dev_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/dev")
            .service(handlers::dev::create_user)
            .service(handlers::dev::list_users)
            .service(handlers::dev::delete_user)
    );

    cfg.service(
        web::scope("/api/test")
            .service(handlers::diagnostics::create_token)
            .service(handlers::diagnostics::test_health)
            .service(handlers::diagnostics::validate_token)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "user_api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
