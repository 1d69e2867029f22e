//! JWT 인증 미들웨어
//!
//! `Authorization: Bearer <token>` 헤더를 검증하고 [`AuthenticatedUser`](crate::domain::AuthenticatedUser)를
//! request extensions에 넣습니다.
//!
//! | 모드 | 토큰 없음/무효 | 토큰 유효 |
//! |------|----------------|-----------|
//! | `Required` | 401 `{"error": "..."}` | 사용자 주입 후 진행 |
//! | `Optional` | 그대로 진행 | 사용자 주입 후 진행 |
//!
//! 토큰 서명만 확인하며 계정 상태는 보지 않습니다. 탈퇴/비활성 판단은 서비스 계층에서 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
///
/// ```rust,ignore
/// web::scope("/api/users/me")
///     .wrap(AuthMiddleware::required())
///     .service(get_me)
/// ```
pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 유효한 토큰이 없으면 401로 응답합니다.
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 토큰이 있으면 사용자를 주입하고, 없어도 요청을 진행합니다.
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, test, web, App, HttpResponse};
    use crate::domain::{AuthenticatedUser, OptionalUser};
    use crate::services::auth::TokenService;

    #[get("/protected")]
    async fn protected(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    #[get("/optional")]
    async fn optional_route(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(user) => HttpResponse::Ok().body(user.user_id),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn test_required_without_token_is_unauthorized() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(AuthMiddleware::required()).service(protected))
        ).await;

        let req = test::TestRequest::get().uri("/api/protected").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Authorization"));
    }

    #[actix_web::test]
    async fn test_required_with_invalid_token_is_unauthorized() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(AuthMiddleware::required()).service(protected))
        ).await;

        let req = test::TestRequest::get()
            .uri("/api/protected")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_required_with_valid_token_injects_user() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(AuthMiddleware::required()).service(protected))
        ).await;
        let token = TokenService::instance().create_token("65f0c0ffee00000000000001").unwrap();

        let req = test::TestRequest::get()
            .uri("/api/protected")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body = test::read_body(resp).await;
        assert_eq!(body, "65f0c0ffee00000000000001");
    }

    #[actix_web::test]
    async fn test_optional_mode_allows_anonymous_and_invalid_tokens() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(AuthMiddleware::optional())
                    .service(optional_route)
            )
        ).await;

        let req = test::TestRequest::get().uri("/api/optional").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");

        let req = test::TestRequest::get()
            .uri("/api/optional")
            .insert_header(("Authorization", "Bearer broken"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");

        let token = TokenService::instance().create_token("65f0c0ffee00000000000002").unwrap();
        let req = test::TestRequest::get()
            .uri("/api/optional")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "65f0c0ffee00000000000002");
    }
}
