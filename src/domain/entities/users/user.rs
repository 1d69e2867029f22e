//! User Entity Implementation
//!
//! 소셜 로그인(Google, Naver)과 개발용 로그인을 모두 표현하는 사용자 엔티티입니다.
//!
//! # 저장 형식
//!
//! ```json
//! {
//!   "_id": ObjectId("65f0c0ffee..."),
//!   "provider": "google",
//!   "provider_id": "10987654321",
//!   "email": "user@example.com",
//!   "nickname": "홍길동",
//!   "introduction": null,
//!   "profile_image": "https://lh3.googleusercontent.com/...",
//!   "status": "ACTIVE",
//!   "created_at": ISODate("..."),
//!   "updated_at": ISODate("...")
//! }
//! ```
//!
//! # 상태 전이
//!
//! ```text
//! ACTIVE ──mark_deleted()──► DELETED ──reactivate()──► ACTIVE
//! INACTIVE (관리자 비활성화, 로그인/조회 불가)
//! ```

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// 계정 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    Inactive,
    /// 회원 탈퇴 (소프트 삭제)
    Deleted,
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Active
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// MongoDB ObjectId. 최초 저장 시 할당되며 JWT `sub`로 사용됩니다.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub provider: AuthProvider,
    /// 제공자 내에서 유일한 사용자 ID
    pub provider_id: String,
    pub email: String,
    pub nickname: String,
    pub introduction: Option<String>,
    pub profile_image: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 소셜 로그인으로 최초 가입한 사용자를 생성합니다.
    pub fn new_oauth(
        provider: AuthProvider,
        provider_id: String,
        email: String,
        nickname: String,
        profile_image: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            provider,
            provider_id,
            email,
            nickname,
            introduction: None,
            profile_image,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// 개발용 로그인 사용자를 생성합니다. 이메일을 provider_id로 사용합니다.
    pub fn new_dev(email: String, nickname: String) -> Self {
        Self::new_oauth(AuthProvider::Dev, email.clone(), email, nickname, None)
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn is_deleted(&self) -> bool {
        self.status == UserStatus::Deleted
    }

    /// 회원 탈퇴 처리 (소프트 삭제)
    pub fn mark_deleted(&mut self) {
        self.status = UserStatus::Deleted;
    }

    /// 탈퇴한 계정으로 다시 로그인한 경우 계정을 복구합니다.
    pub fn reactivate(&mut self) {
        self.status = UserStatus::Active;
    }
}
