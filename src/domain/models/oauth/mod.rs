//! # OAuth Domain Models
//!
//! 제공자마다 다른 사용자 정보 응답을 하나의 [`ProviderProfile`]로 정규화합니다.
//!
//! | 제공자 | 응답 구조 | provider_id | 이름 |
//! |--------|-----------|-------------|------|
//! | Google | 평면 JSON | `id` (없으면 `sub`) | `name` |
//! | Naver | `response` 객체 안 | `response.id` | `response.name` (없으면 `nickname`) |

pub mod provider_profile;

pub use provider_profile::*;
