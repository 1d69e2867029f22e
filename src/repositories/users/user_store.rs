//! 사용자 저장소 트레이트

use std::ops::Deref;
use std::sync::Arc;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::User;

/// 사용자 저장소 추상화
///
/// 모든 구현은 다음 제약을 지켜야 합니다.
/// - (provider, provider_id)와 email은 유일하며, 위반 시 `ConflictError`
/// - `save`는 `id`가 없으면 삽입하고 `created_at`/`updated_at`을 설정,
///   있으면 전체 문서를 교체하고 `updated_at`만 갱신
/// - 탈퇴(DELETED) 사용자도 조회 대상에 포함 (상태 판단은 서비스 계층)
#[async_trait]
pub trait UserStore: Send + Sync {
    /// ObjectId hex 문자열로 사용자를 조회합니다.
    ///
    /// 형식이 잘못된 ID는 `ValidationError`를 반환합니다.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// 수정 직전 조회. 캐시를 거치지 않고 원본 저장소를 읽어야 합니다.
    ///
    /// 캐시가 없는 구현은 기본 구현(`find_by_id`)을 그대로 사용합니다.
    async fn find_by_id_for_update(&self, id: &str) -> AppResult<Option<User>> {
        self.find_by_id(id).await
    }

    async fn find_by_provider_and_provider_id(
        &self,
        provider: &AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<User>>;

    async fn exists_by_provider_and_provider_id(
        &self,
        provider: &AuthProvider,
        provider_id: &str,
    ) -> AppResult<bool> {
        Ok(self.find_by_provider_and_provider_id(provider, provider_id).await?.is_some())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 사용자를 저장하고 저장된 값(할당된 id, 갱신된 시각 포함)을 반환합니다.
    async fn save(&self, user: User) -> AppResult<User>;

    /// 최근 가입 순으로 모든 사용자를 반환합니다.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// 문서를 물리적으로 삭제합니다. 삭제된 경우 `true`.
    async fn delete_by_id(&self, id: &str) -> AppResult<bool>;
}

/// `ServiceLocator`에 등록되는 사용자 저장소 핸들
///
/// `#[service]`는 `Arc<T>` 필드를 `T`의 타입으로 찾아 주입하는데, 트레이트 객체는 크기가 정해지지 않아
/// 그대로 등록할 수 없으므로 한 번 감쌉니다.
#[derive(Clone)]
pub struct SharedUserStore(Arc<dyn UserStore>);

impl SharedUserStore {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self(store)
    }
}

impl Deref for SharedUserStore {
    type Target = dyn UserStore;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// 사용자 ID 문자열을 ObjectId로 변환합니다.
pub fn parse_user_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}
