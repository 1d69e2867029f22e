//! # Domain Layer Module
//!
//! 사용자 엔티티, API 계약(DTO), 인증 모델을 정의하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB에 저장되는 User 엔티티
//! ├── dto       - HTTP 요청/응답 (camelCase JSON)
//! └── models    - JWT 클레임, 인증된 사용자, OAuth 프로필
//!      │
//!      ▼
//! Services → Repositories
//! ```
//!
//! ## 모듈 구성
//!
//! ### [`entities`]
//!
//! 영속 객체입니다. `User`는 (provider, provider_id)와 email이 유일하며,
//! 회원 탈퇴는 `status = DELETED`로 표시하는 소프트 삭제입니다.
//!
//! ### [`dto`]
//!
//! 모바일 앱과 catalog-api가 사용하는 JSON 형식입니다.
//! 필드 이름은 모두 camelCase로 직렬화됩니다.
//!
//! ```json
//! {
//!   "accessToken": "eyJhbGciOiJIUzI1NiJ9...",
//!   "tokenType": "Bearer",
//!   "expiresIn": 86400,
//!   "user": { "id": "65f0...", "email": "a@b.com", "nickname": "홍길동" }
//! }
//! ```
//!
//! ### [`models`]
//!
//! 요청 처리 중에만 존재하는 값들입니다.
//! - `TokenClaims`: JWT 페이로드 (`sub`, `iat`, `exp`)
//! - `AuthenticatedUser`: 인증 미들웨어가 request extensions에 넣는 사용자
//! - `ProviderProfile`: 제공자별 사용자 정보 응답을 정규화한 프로필

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::{User, UserStatus};
pub use dto::{
    AuthorizationUrlResponse, AuthorizeQuery, CreateDevUserRequest, CreateTestTokenRequest, DevLoginRequest,
    LoginResponse, LoginUrlResponse, OAuthCallbackQuery, ProviderTokenResponse, TokenValidationResponse,
    UpdateUserRequest, UserResponse, ValidateTokenRequest,
};
pub use models::{AuthMode, AuthenticatedUser, OptionalUser, ProviderProfile, TokenClaims};
