//! # Repository Layer
//!
//! 사용자 데이터 접근 계층입니다. 서비스는 [`users::user_store::UserStore`] 트레이트에만 의존하고,
//! 실제 구현은 `USER_STORE` 설정에 따라 `main`에서 선택해 `ServiceLocator`에 등록합니다.
//!
//! | 구현 | 저장소 | 용도 |
//! |------|--------|------|
//! | [`users::user_repo::UserRepository`] | MongoDB + Redis 캐시 | 운영 |
//! | [`users::memory_user_store::InMemoryUserStore`] | 프로세스 메모리 | 로컬 실행, 테스트 |

pub mod users;

pub use users::*;
