//! # Core Framework Module
//!
//! 서비스 전역에서 사용하는 에러 타입과 싱글톤 레지스트리를 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 싱글톤 레지스트리
//! - **ServiceLocator**: 타입 기반 인스턴스 저장소 (`set` / `get` / `try_get`)
//! - **ServiceRegistration**: `inventory`로 수집되는 서비스 생성자
//! - **initialize_all**: 기동 시점에 모든 서비스를 미리 생성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: `ResponseError` 구현으로 `{"error": ...}` JSON 응답
//! - **ErrorContext**: 외부 에러에 컨텍스트를 붙여 `AppError`로 변환
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! use crate::core::registry::ServiceLocator;
//!
//! let database = Arc::new(Database::new().await?);
//! ServiceLocator::set(database);
//!
//! let repository: Arc<dyn UserStore> = Arc::new(UserRepository::new(database, redis).await?);
//! ServiceLocator::set(Arc::new(SharedUserStore::new(repository)));
//!
//! ServiceLocator::initialize_all().await?;
//! ```
//!
//! ## 트러블슈팅
//!
//! ### 미등록 타입 에러
//! ```text
//! panic: Service not found: SharedUserStore. Register it with inventory::submit! or ServiceLocator::set()
//! ```
//! **해결**: `main`에서 저장소를 등록하기 전에 서비스를 사용하지 않았는지 확인하세요.

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
