//! 사용자 저장소

pub mod user_store;
pub mod user_repo;
pub mod memory_user_store;

pub use user_store::*;
pub use user_repo::*;
pub use memory_user_store::*;
