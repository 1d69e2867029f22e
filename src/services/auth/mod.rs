//! 인증 서비스 모듈
//!
//! - [`token_service`] - HS256 액세스 토큰 발급과 검증
//! - [`oauth_service`] - Authorization Code 플로우 (인가 URL, 토큰 교환, 사용자 정보)
//! - [`oauth_state_store`] - 콜백까지 state를 보관하는 1회용 저장소

pub mod token_service;
pub mod oauth_service;
pub mod oauth_state_store;

pub use token_service::*;
pub use oauth_service::*;
pub use oauth_state_store::*;
