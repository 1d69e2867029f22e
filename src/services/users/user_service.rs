//! # 사용자 서비스
//!
//! 사용자 생명주기 비즈니스 로직을 담당합니다.
//!
//! ## 계정 상태 규칙
//!
//! | 상태 | 로그인 | `/api/users/me` | 공개 프로필 |
//! |------|--------|-----------------|-------------|
//! | `ACTIVE` | 허용 | 허용 | 그대로 노출 |
//! | `INACTIVE` | 403 | 403 | 그대로 노출 |
//! | `DELETED` | 재로그인 시 복구 | 404 | 익명화된 자리표시자 |
//!
//! 이메일은 계정 간에 유일합니다. 로그인 중 다른 계정이 이미 사용하는 이메일이
//! 들어오면 409를 반환합니다.

use std::sync::Arc;
use chrono::Utc;
use singleton_macro::service;
use crate::{
    config::AuthProvider,
    core::errors::{AppError, AppResult},
    domain::{ProviderProfile, UpdateUserRequest, User, UserResponse, UserStatus},
    repositories::users::user_store::{SharedUserStore, UserStore},
    services::catalog::catalog_api_service::CatalogApiService,
    utils::string_utils::{clean_optional_string, validate_required_string},
};

const DEFAULT_DEV_EMAIL: &str = "dev@example.com";
const DEFAULT_DEV_NICKNAME: &str = "개발자";
const DEV_USER_INTRODUCTION: &str = "개발용 테스트 사용자";

/// 사용자 저장소는 기동 시 `ServiceLocator::set(Arc<SharedUserStore>)`으로 등록되어 있어야 합니다.
#[service(name = "user")]
pub struct UserService {
    store: Arc<SharedUserStore>,
    catalog: Arc<CatalogApiService>,
}

impl UserService {
    pub fn with_dependencies(store: Arc<dyn UserStore>, catalog: Arc<CatalogApiService>) -> Self {
        Self {
            store: Arc::new(SharedUserStore::new(store)),
            catalog,
        }
    }

    /// OAuth 로그인 사용자를 가입시키거나 기존 계정을 갱신합니다.
    ///
    /// - (provider, provider_id)로 가입된 계정이 있으면 이메일, 닉네임, 프로필 이미지를 갱신
    /// - 탈퇴한 계정이면 복구
    /// - 없으면 새로 가입
    ///
    /// # Errors
    ///
    /// - 비활성화된 계정: `AuthorizationError` (403)
    /// - 이메일이 다른 계정에서 사용 중: `ConflictError` (409)
    pub async fn process_oauth_user(&self, provider: &AuthProvider, profile: ProviderProfile) -> AppResult<User> {
        let existing = self.store
            .find_by_provider_and_provider_id(provider, &profile.provider_id)
            .await?;

        match existing {
            Some(mut user) => {
                ensure_not_inactive(&user)?;
                if user.is_deleted() {
                    log::info!("탈퇴한 {} 계정 복구: {}", provider, profile.email);
                    user.reactivate();
                }

                if user.email != profile.email {
                    self.ensure_email_available(&profile.email, &user).await?;
                }

                user.email = profile.email;
                user.nickname = profile.nickname;
                if profile.profile_image.is_some() {
                    user.profile_image = profile.profile_image;
                }

                self.store.save(user).await
            }
            None => {
                if self.store.find_by_email(&profile.email).await?.is_some() {
                    return Err(email_in_use());
                }

                log::info!("새 {} 사용자 가입: {}", provider, profile.email);
                self.store
                    .save(User::new_oauth(
                        *provider,
                        profile.provider_id,
                        profile.email,
                        profile.nickname,
                        profile.profile_image,
                    ))
                    .await
            }
        }
    }

    /// 개발용 로그인 사용자를 처리합니다. 이메일을 provider_id로 사용합니다.
    pub async fn process_dev_user(&self, email: &str, nickname: &str) -> AppResult<User> {
        let email = validate_required_string(email, "이메일")?;
        let nickname = validate_required_string(nickname, "닉네임")?;

        match self.store.find_by_provider_and_provider_id(&AuthProvider::Dev, &email).await? {
            Some(mut user) => {
                ensure_not_inactive(&user)?;
                if user.is_deleted() {
                    user.reactivate();
                }
                user.nickname = nickname;
                self.store.save(user).await
            }
            None => {
                if self.store.find_by_email(&email).await?.is_some() {
                    return Err(email_in_use());
                }
                self.store.save(User::new_dev(email, nickname)).await
            }
        }
    }

    /// 개발용 사용자를 만들거나 같은 이메일의 기존 사용자를 반환합니다.
    pub async fn create_dev_user(&self, email: Option<String>, nickname: Option<String>) -> AppResult<User> {
        let email = clean_optional_string(email).unwrap_or_else(|| DEFAULT_DEV_EMAIL.to_string());
        let nickname = clean_optional_string(nickname).unwrap_or_else(|| DEFAULT_DEV_NICKNAME.to_string());

        if let Some(user) = self.store.find_by_email(&email).await? {
            log::debug!("기존 개발용 사용자 사용: {}", email);
            return Ok(user);
        }

        let provider_id = format!("dev-{}", Utc::now().timestamp_millis());
        let mut user = User::new_oauth(AuthProvider::Dev, provider_id, email, nickname, None);
        user.introduction = Some(DEV_USER_INTRODUCTION.to_string());

        self.store.save(user).await
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> AppResult<User> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))
    }

    /// 인증된 본인 계정을 조회합니다.
    ///
    /// 탈퇴한 계정은 404, 비활성화된 계정은 403입니다.
    pub async fn get_active_user(&self, user_id: &str) -> AppResult<User> {
        let user = self.get_user_by_id(user_id).await?;
        ensure_active(user)
    }

    /// 수정 경로용 조회. 캐시를 거치지 않아 방금 탈퇴한 계정을 되살리지 않습니다.
    async fn load_active_user_for_update(&self, user_id: &str) -> AppResult<User> {
        let user = self.store
            .find_by_id_for_update(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))?;
        ensure_active(user)
    }

    /// 다른 사용자에게 보여줄 프로필을 반환합니다. 탈퇴한 사용자는 익명화됩니다.
    pub async fn get_public_profile(&self, user_id: &str) -> AppResult<UserResponse> {
        let user = self.get_user_by_id(user_id).await?;

        Ok(if user.is_deleted() {
            UserResponse::withdrawn(&user)
        } else {
            UserResponse::from(&user)
        })
    }

    /// 값이 있는 필드만 갱신합니다.
    ///
    /// 빈 문자열로 보낸 `introduction`, `profileImage`는 값을 지웁니다.
    pub async fn update_user(&self, user_id: &str, request: UpdateUserRequest) -> AppResult<User> {
        let mut user = self.load_active_user_for_update(user_id).await?;

        if let Some(nickname) = request.nickname {
            user.nickname = validate_required_string(&nickname, "닉네임")?;
        }
        if request.introduction.is_some() {
            user.introduction = clean_optional_string(request.introduction);
        }
        if request.profile_image.is_some() {
            user.profile_image = clean_optional_string(request.profile_image);
        }

        self.store.save(user).await
    }

    /// 회원 탈퇴 (소프트 삭제)
    ///
    /// 상태를 `DELETED`로 바꾼 뒤 catalog-api에 데이터 정리를 요청합니다.
    /// 정리 요청의 성공 여부는 결과에 영향을 주지 않습니다.
    pub async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        let mut user = self.load_active_user_for_update(user_id).await?;
        user.mark_deleted();
        self.store.save(user).await?;

        log::info!("회원 탈퇴 처리: {}", user_id);
        self.catalog.delete_user_data(user_id).await;

        Ok(())
    }

    /// 모든 사용자 (최근 가입 순)
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.store.find_all().await
    }

    /// 문서를 물리적으로 삭제합니다. 개발용 엔드포인트에서만 사용합니다.
    pub async fn hard_delete_user(&self, user_id: &str) -> AppResult<()> {
        if !self.store.delete_by_id(user_id).await? {
            return Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)));
        }

        log::warn!("사용자 영구 삭제: {}", user_id);
        Ok(())
    }

    async fn ensure_email_available(&self, email: &str, owner: &User) -> AppResult<()> {
        match self.store.find_by_email(email).await? {
            Some(other) if other.id != owner.id => Err(email_in_use()),
            _ => Ok(()),
        }
    }
}

/// 탈퇴한 계정은 404, 비활성화된 계정은 403
fn ensure_active(user: User) -> AppResult<User> {
    if user.is_deleted() {
        return Err(AppError::NotFound("탈퇴한 사용자입니다".to_string()));
    }
    ensure_not_inactive(&user)?;
    Ok(user)
}

fn ensure_not_inactive(user: &User) -> AppResult<()> {
    if user.status == UserStatus::Inactive {
        return Err(AppError::AuthorizationError("비활성화된 계정입니다".to_string()));
    }
    Ok(())
}

fn email_in_use() -> AppError {
    AppError::ConflictError("이미 다른 계정에서 사용 중인 이메일입니다".to_string())
}
