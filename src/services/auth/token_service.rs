//! # JWT 토큰 서비스
//!
//! HS256 액세스 토큰을 발급하고 검증합니다.
//! catalog-api가 같은 `JWT_SECRET`으로 토큰을 검증하므로 클레임은 `sub`, `iat`, `exp`만 사용합니다.
//!
//! ## 토큰 구조
//!
//! ```json
//! { "alg": "HS256", "typ": "JWT" }
//! { "sub": "65f0c0ffee00000000000001", "iat": 1710000000, "exp": 1710086400 }
//! ```
//!
//! ## 에러 매핑
//!
//! | 상황 | 에러 |
//! |------|------|
//! | 만료된 토큰 | `AuthenticationError("토큰이 만료되었습니다")` |
//! | 서명 불일치, 형식 오류 등 | `AuthenticationError("유효하지 않은 토큰입니다")` |
//! | Bearer 형식이 아닌 헤더 | `AuthenticationError("유효하지 않은 인증 헤더 형식입니다")` |

use std::any::Any;
use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use crate::{
    config::JwtConfig,
    core::errors::{AppError, AppResult, ErrorContext},
    domain::{LoginResponse, TokenClaims, User, UserResponse},
};

/// HS256 서명에 필요한 최소 시크릿 길이 (바이트)
pub const MIN_SECRET_BYTES: usize = 32;

/// 허용하는 최대 토큰 유효 시간 (1년)
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity_seconds: i64,
}

// 생성이 실패할 수 있어(시크릿 길이, 유효 시간 범위) `#[service]` 대신 직접 싱글톤을 구성합니다.
static TOKEN_SERVICE_INSTANCE: OnceCell<Arc<TokenService>> = OnceCell::new();

impl TokenService {
    /// 싱글톤 인스턴스를 반환합니다.
    ///
    /// # Panics
    ///
    /// `JWT_SECRET`이 32바이트보다 짧은 경우. 기동 시 [`TokenService::init`]으로 먼저 검증합니다.
    pub fn instance() -> Arc<Self> {
        Self::init().expect("TokenService 초기화 실패: JWT_SECRET 설정을 확인하세요")
    }

    /// 환경 설정으로 싱글톤을 초기화합니다. 이미 초기화되었다면 기존 인스턴스를 반환합니다.
    pub fn init() -> AppResult<Arc<Self>> {
        TOKEN_SERVICE_INSTANCE
            .get_or_try_init(|| Self::new(&JwtConfig::secret(), JwtConfig::expiration_hours()).map(Arc::new))
            .cloned()
    }

    /// # Errors
    ///
    /// - 시크릿이 [`MIN_SECRET_BYTES`]보다 짧은 경우
    /// - `expiration_hours`가 1 ~ [`MAX_EXPIRATION_HOURS`] 범위를 벗어난 경우
    pub fn new(secret: &str, expiration_hours: i64) -> AppResult<Self> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET은 최소 {}바이트 이상이어야 합니다 (현재 {}바이트)",
                MIN_SECRET_BYTES,
                secret.len()
            )));
        }

        if !(1..=MAX_EXPIRATION_HOURS).contains(&expiration_hours) {
            return Err(AppError::InternalError(format!(
                "JWT_EXPIRATION_HOURS는 1 ~ {} 사이여야 합니다 (현재 {})",
                MAX_EXPIRATION_HOURS,
                expiration_hours
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity_seconds: expiration_hours * 3600,
        })
    }

    /// 사용자 ID를 `sub`로 하는 액세스 토큰을 발급합니다.
    pub fn create_token(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.validity_seconds);

        let claims = TokenClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .context("JWT 토큰 생성 실패")
    }

    /// 저장된 사용자에 대한 로그인 응답을 만듭니다.
    pub fn login_response(&self, user: &User) -> AppResult<LoginResponse> {
        let user_id = user.id_string().ok_or_else(|| {
            AppError::InternalError("사용자 ID가 없습니다".to_string())
        })?;
        let access_token = self.create_token(&user_id)?;

        Ok(LoginResponse::new(UserResponse::from(user), access_token, self.validity_seconds))
    }

    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => {
                    log::debug!("Invalid JWT token: {}", e);
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                }
            })
    }

    pub fn validate_token(&self, token: &str) -> bool {
        self.verify_token(token).is_ok()
    }

    pub fn get_user_id(&self, token: &str) -> AppResult<String> {
        Ok(self.verify_token(token)?.sub)
    }

    /// `Authorization` 헤더 값에서 토큰 부분을 꺼냅니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
    }

    /// 액세스 토큰 유효 시간 (초)
    pub fn token_validity_seconds(&self) -> i64 {
        self.validity_seconds
    }
}

fn token_service_constructor() -> Box<dyn Any + Send + Sync> {
    Box::new(TokenService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "token_service",
        constructor: token_service_constructor,
    }
}
