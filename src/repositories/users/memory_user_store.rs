//! 프로세스 메모리 기반 사용자 저장소
//!
//! `USER_STORE=memory`로 MongoDB/Redis 없이 서비스를 띄우거나 테스트에서 사용합니다.
//! 유니크 제약과 타임스탬프 규칙은 MongoDB 구현과 동일합니다.

use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::User;
use super::user_store::{parse_user_id, UserStore};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, HashMap<ObjectId, User>>> {
        self.users
            .read()
            .map_err(|_| AppError::InternalError("사용자 저장소 잠금 실패".to_string()))
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, HashMap<ObjectId, User>>> {
        self.users
            .write()
            .map_err(|_| AppError::InternalError("사용자 저장소 잠금 실패".to_string()))
    }
}

/// 다른 사용자와 유니크 필드가 겹치는지 확인합니다.
fn check_unique(users: &HashMap<ObjectId, User>, candidate: &User) -> AppResult<()> {
    for (id, existing) in users {
        if Some(*id) == candidate.id {
            continue;
        }
        if existing.provider == candidate.provider && existing.provider_id == candidate.provider_id {
            return Err(AppError::ConflictError("이미 가입된 소셜 계정입니다".to_string()));
        }
        if existing.email == candidate.email {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = parse_user_id(id)?;
        Ok(self.read()?.get(&object_id).cloned())
    }

    async fn find_by_provider_and_provider_id(
        &self,
        provider: &AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<User>> {
        Ok(self.read()?
            .values()
            .find(|user| user.provider == *provider && user.provider_id == provider_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.read()?.values().find(|user| user.email == email).cloned())
    }

    async fn save(&self, mut user: User) -> AppResult<User> {
        let mut users = self.write()?;

        if let Some(id) = user.id {
            if !users.contains_key(&id) {
                return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
            }
        }
        check_unique(&users, &user)?;

        let now = DateTime::now();
        user.updated_at = now;
        let id = match user.id {
            Some(id) => id,
            None => {
                user.created_at = now;
                let id = ObjectId::new();
                user.id = Some(id);
                id
            }
        };

        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.read()?.values().cloned().collect();
        users.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(users)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_user_id(id)?;
        Ok(self.write()?.remove(&object_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google_user(provider_id: &str, email: &str) -> User {
        User::new_oauth(
            AuthProvider::Google,
            provider_id.to_string(),
            email.to_string(),
            "닉네임".to_string(),
            None,
        )
    }

    #[actix_web::test]
    async fn test_save_assigns_id_and_finds_it() {
        let store = InMemoryUserStore::new();

        let saved = store.save(google_user("g-1", "a@example.com")).await.unwrap();
        let id = saved.id_string().unwrap();

        let found = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@example.com");
        assert!(store.exists_by_provider_and_provider_id(&AuthProvider::Google, "g-1").await.unwrap());
        assert!(!store.exists_by_provider_and_provider_id(&AuthProvider::Naver, "g-1").await.unwrap());
        assert!(store.find_by_email("a@example.com").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_update_keeps_created_at() {
        let store = InMemoryUserStore::new();
        let mut saved = store.save(google_user("g-1", "a@example.com")).await.unwrap();
        let created_at = saved.created_at;

        saved.nickname = "바뀐닉네임".to_string();
        let updated = store.save(saved).await.unwrap();

        assert_eq!(updated.created_at, created_at);
        assert!(updated.updated_at >= created_at);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryUserStore::new();
        store.save(google_user("g-1", "same@example.com")).await.unwrap();

        let result = store.save(google_user("g-2", "same@example.com")).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_duplicate_provider_id_conflicts() {
        let store = InMemoryUserStore::new();
        store.save(google_user("g-1", "one@example.com")).await.unwrap();

        let result = store.save(google_user("g-1", "two@example.com")).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_save_unknown_id_is_not_found() {
        let store = InMemoryUserStore::new();
        let mut user = google_user("g-1", "a@example.com");
        user.id = Some(ObjectId::new());

        assert!(matches!(store.save(user).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_delete_by_id() {
        let store = InMemoryUserStore::new();
        let saved = store.save(google_user("g-1", "a@example.com")).await.unwrap();
        let id = saved.id_string().unwrap();

        assert!(store.delete_by_id(&id).await.unwrap());
        assert!(!store.delete_by_id(&id).await.unwrap());
        assert!(store.find_by_id(&id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_malformed_id_is_validation_error() {
        let store = InMemoryUserStore::new();
        assert!(matches!(store.find_by_id("not-an-id").await, Err(AppError::ValidationError(_))));
    }
}
