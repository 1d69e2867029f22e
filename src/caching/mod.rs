//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 사용자 조회 캐시를 제공합니다.
//! MongoDB 저장소를 사용할 때만 연결하며, 메모리 저장소 모드에서는 사용하지 않습니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("user:65f0c0ffee", &user, 600).await?;
//!
//! let cached: Option<User> = cache.get("user:65f0c0ffee").await?;
//! cache.del("user:65f0c0ffee").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
