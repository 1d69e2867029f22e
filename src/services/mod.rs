//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 `OnceCell` 싱글톤이며 `inventory`로 [`ServiceLocator`](crate::core::registry::ServiceLocator)에 등록됩니다.
//!
//! - [`auth`] - JWT 발급/검증, OAuth 2.0 로그인 (Google, Naver)
//! - [`users`] - 사용자 가입, 프로필 수정, 회원 탈퇴
//! - [`catalog`] - 탈퇴 시 catalog-api 데이터 정리
//!
//! ```rust,ignore
//! use crate::services::{auth::TokenService, users::UserService};
//!
//! let user = UserService::instance().get_active_user(&user_id).await?;
//! let login = TokenService::instance().login_response(&user)?;
//! ```

pub mod auth;
pub mod users;
pub mod catalog;
