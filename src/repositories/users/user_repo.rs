//! # 사용자 리포지토리 구현
//!
//! MongoDB `users` 컬렉션을 주 저장소로 사용하고, ID 조회 결과를 Redis에 10분간 캐싱합니다.
//! 저장 시에는 저장된 값으로 캐시를 덮어쓰며(write-through), 수정 경로의 조회는 캐시를 거치지 않습니다.
//!
//! ## 인덱스
//!
//! | 이름 | 키 | 옵션 |
//! |------|----|------|
//! | `provider_provider_id_unique` | `{provider: 1, provider_id: 1}` | unique |
//! | `email_unique` | `{email: 1}` | unique |
//! | `created_at_desc` | `{created_at: -1}` | |
//!
//! 유니크 인덱스 위반(코드 11000)은 `AppError::ConflictError`(409)로 변환됩니다.

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    config::AuthProvider,
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::users::user::User,
};
use super::user_store::{parse_user_id, UserStore};

const COLLECTION_NAME: &str = "users";
const CACHE_TTL_SECONDS: u64 = 600;
const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct UserRepository {
    db: Arc<Database>,

    /// 없으면 캐시 없이 동작합니다.
    redis: Option<Arc<RedisClient>>,
}

impl UserRepository {
    /// 리포지토리를 생성하고 인덱스를 보장합니다.
    pub async fn new(db: Arc<Database>, redis: Option<Arc<RedisClient>>) -> AppResult<Self> {
        let repository = Self { db, redis };
        repository.create_indexes().await?;
        Ok(repository)
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(COLLECTION_NAME)
    }

    fn cache_key(id: &str) -> String {
        format!("user:{}", id)
    }

    async fn cached(&self, id: &str) -> Option<User> {
        let redis = self.redis.as_ref()?;
        match redis.get::<User>(&Self::cache_key(id)).await {
            Ok(user) => user,
            Err(e) => {
                log::debug!("사용자 캐시 조회 실패 ({}): {}", id, e);
                None
            }
        }
    }

    /// 캐시에 기록하고 성공 여부를 반환합니다. 캐시가 없으면 `true`.
    async fn cache(&self, user: &User) -> bool {
        let (Some(redis), Some(id)) = (self.redis.as_ref(), user.id_string()) else {
            return true;
        };

        match redis.set_with_expiry(&Self::cache_key(&id), user, CACHE_TTL_SECONDS).await {
            Ok(()) => true,
            Err(e) => {
                log::debug!("사용자 캐시 저장 실패 ({}): {}", id, e);
                false
            }
        }
    }

    /// 저장된 값을 캐시에 반영합니다. 기록에 실패하면 이전 값이 남지 않도록 키를 지웁니다.
    async fn write_through(&self, user: &User) {
        if !self.cache(user).await {
            if let Some(id) = user.id_string() {
                self.invalidate_cache(&id).await;
            }
        }
    }

    async fn find_in_db(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = parse_user_id(id)?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn invalidate_cache(&self, id: &str) {
        if let Some(redis) = self.redis.as_ref() {
            if let Err(e) = redis.del(&Self::cache_key(id)).await {
                log::warn!("사용자 캐시 무효화 실패 ({}): {}", id, e);
            }
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let provider_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "provider_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_provider_id_unique".to_string())
                .build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([provider_index, email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::info!("✅ users 컬렉션 인덱스 확인 완료");
        Ok(())
    }
}

/// 쓰기 에러를 `AppError`로 변환합니다. 중복 키는 409로 매핑합니다.
fn map_write_error(error: mongodb::error::Error) -> AppError {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE => {
            AppError::ConflictError(duplicate_key_message(&write_error.message).to_string())
        }
        _ => AppError::DatabaseError(error.to_string()),
    }
}

fn duplicate_key_message(server_message: &str) -> &'static str {
    if server_message.contains("email_unique") {
        "이미 사용 중인 이메일입니다"
    } else {
        "이미 가입된 소셜 계정입니다"
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        parse_user_id(id)?;

        if let Some(cached) = self.cached(id).await {
            return Ok(Some(cached));
        }

        let user = self.find_in_db(id).await?;
        if let Some(ref user) = user {
            self.cache(user).await;
        }

        Ok(user)
    }

    async fn find_by_id_for_update(&self, id: &str) -> AppResult<Option<User>> {
        self.find_in_db(id).await
    }

    async fn find_by_provider_and_provider_id(
        &self,
        provider: &AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "provider": provider.as_str(), "provider_id": provider_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn exists_by_provider_and_provider_id(
        &self,
        provider: &AuthProvider,
        provider_id: &str,
    ) -> AppResult<bool> {
        let count = self.collection()
            .count_documents(doc! { "provider": provider.as_str(), "provider_id": provider_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn save(&self, mut user: User) -> AppResult<User> {
        let now = DateTime::now();
        user.updated_at = now;

        match user.id {
            None => {
                user.created_at = now;

                let result = self.collection()
                    .insert_one(&user)
                    .await
                    .map_err(map_write_error)?;

                let inserted_id = result.inserted_id.as_object_id().ok_or_else(|| {
                    AppError::DatabaseError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string())
                })?;
                user.id = Some(inserted_id);
                log::debug!("사용자 생성: {} ({})", inserted_id.to_hex(), user.email);
            }
            Some(object_id) => {
                let result = self.collection()
                    .replace_one(doc! { "_id": object_id }, &user)
                    .await
                    .map_err(map_write_error)?;

                if result.matched_count == 0 {
                    return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
                }
            }
        }

        self.write_through(&user).await;
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        self.collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_user_id(id)?;

        let result = self.collection()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.invalidate_cache(id).await;
        Ok(result.deleted_count > 0)
    }
}
