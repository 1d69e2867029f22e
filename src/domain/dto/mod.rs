//! # Data Transfer Objects
//!
//! HTTP 계층에서 주고받는 요청/응답 구조체입니다.
//! 모바일 앱과 catalog-api가 의존하는 형식이므로 JSON 필드는 camelCase를 유지합니다.
//!
//! - [`users`] - 사용자 프로필, 로그인 응답, 개발용 사용자 생성 요청
//! - [`auth`] - OAuth 인가/콜백, 토큰 검증 관련 요청과 응답

pub mod users;
pub mod auth;

pub use users::{CreateDevUserRequest, DevLoginRequest, LoginResponse, UpdateUserRequest, UserResponse};
pub use auth::{
    AuthorizationUrlResponse, AuthorizeQuery, CreateTestTokenRequest, LoginUrlResponse, OAuthCallbackQuery,
    ProviderTokenResponse, TokenValidationResponse, ValidateTokenRequest,
};
