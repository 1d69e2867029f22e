//! 사용자 요청 DTO
//!
//! 모든 요청 DTO는 `validator::Validate`를 구현하며, 핸들러에서
//! `payload.validate()` 실패 시 `AppError::ValidationError`(400)로 변환합니다.

pub mod update_user_request;
pub mod dev_user_request;

pub use update_user_request::*;
pub use dev_user_request::*;
