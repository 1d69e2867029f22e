//! # Domain Models
//!
//! 요청 처리 중에만 존재하는 인증 관련 값 객체들입니다.
//!
//! - [`token`] - JWT 클레임
//! - [`auth`] - 인증 미들웨어 모드와 인증된 사용자 추출자
//! - [`oauth`] - 제공자별 사용자 정보 응답을 정규화한 프로필

pub mod auth;
pub mod token;
pub mod oauth;

pub use auth::{AuthMode, AuthenticatedUser, OptionalUser};
pub use token::TokenClaims;
pub use oauth::ProviderProfile;
