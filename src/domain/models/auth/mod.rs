//! 인증 모델

pub mod authenticated_user;
pub mod auth_mode;

pub use authenticated_user::*;
pub use auth_mode::*;
