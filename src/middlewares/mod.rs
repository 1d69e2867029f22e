//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 담당합니다.
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출 및 HS256 검증
//! - 사용자 정보를 request extension에 저장
//! - 필수/선택 인증 모드 지원
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .service(
//!         web::scope("/api/users/me")
//!             .wrap(AuthMiddleware::required())
//!             .service(get_me)
//!     )
//!     .service(
//!         web::scope("/api/auth")
//!             .service(
//!                 web::scope("/logout")
//!                     .wrap(AuthMiddleware::optional())
//!                     .service(logout)
//!             )
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
