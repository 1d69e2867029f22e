//! 인증 관련 DTO
//!
//! OAuth 인가 URL 발급, 제공자 콜백, 토큰 검증 엔드포인트의 요청과 응답입니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
