//! user-api
//!
//! 모바일 앱과 catalog-api가 사용하는 사용자 인증 서비스입니다.
//! 소셜 로그인(Google, Naver)과 개발용 로그인으로 HS256 JWT를 발급하고,
//! 사용자 프로필 조회/수정과 회원 탈퇴(소프트 삭제)를 제공합니다.
//!
//! # Features
//!
//! - **OAuth 2.0**: Google, Naver Authorization Code 로그인
//! - **JWT 인증**: catalog-api와 시크릿을 공유하는 상태 없는 액세스 토큰
//! - **사용자 관리**: 프로필 수정, 회원 탈퇴, 탈퇴 사용자 익명화
//! - **저장소 선택**: MongoDB + Redis 캐시 또는 메모리 (`USER_STORE`)
//! - **싱글톤 DI**: `OnceCell` + `inventory` 기반 서비스 등록
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, 인증 미들웨어 배치
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰, OAuth, 사용자 생명주기, catalog 정리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   UserStore     │ ← MongoDB(+Redis) 또는 메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use user_api::services::{auth::TokenService, users::UserService};
//!
//! let user = UserService::instance().process_dev_user("dev@example.com", "개발자").await?;
//! let login = TokenService::instance().login_response(&user)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
