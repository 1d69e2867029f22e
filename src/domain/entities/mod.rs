//! # Domain Entities
//!
//! MongoDB 컬렉션에 저장되는 영속 객체들입니다.
//!
//! | 엔티티 | 컬렉션 | 유니크 인덱스 |
//! |--------|--------|---------------|
//! | [`users::user::User`] | `users` | (provider, provider_id), email |

pub mod users;

pub use users::{User, UserStatus};
