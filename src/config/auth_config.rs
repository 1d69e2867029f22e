//! # Authentication Configuration Module
//!
//! OAuth 제공자(Google, Naver), JWT 토큰, OAuth state 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **Google OAuth 2.0**: Authorization Code 방식 소셜 로그인
//! 2. **Naver 로그인**: Authorization Code 방식 소셜 로그인
//! 3. **개발용 로그인**: 이메일/닉네임만으로 로그인 (`dev` 제공자)
//! 4. **JWT 토큰**: catalog-api와 시크릿을 공유하는 HS256 액세스 토큰
//!
//! ## 필수 환경 변수 설정
//!
//! ### OAuth 제공자 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/api/auth/oauth2/google/callback"
//!
//! export NAVER_CLIENT_ID="your-naver-client-id"
//! export NAVER_CLIENT_SECRET="your-naver-client-secret"
//! export NAVER_REDIRECT_URI="http://localhost:8080/api/auth/oauth2/naver/callback"
//! ```
//!
//! `<P>_AUTH_URI`, `<P>_TOKEN_URI`, `<P>_USER_INFO_URI`, `<P>_SCOPE`는 선택이며
//! 각 제공자의 공개 엔드포인트가 기본값으로 사용됩니다.
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="catalog-api와 동일한 32바이트 이상의 시크릿"
//! export JWT_EXPIRATION_HOURS="24"
//! ```
//!
//! ### OAuth state 설정
//! ```bash
//! export OAUTH_STATE_TIMEOUT_MINUTES="10"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AuthProvider, JwtConfig, OAuthClientConfig};
//!
//! let provider = AuthProvider::from_str("naver")?;
//! let client = OAuthClientConfig::from_env(&provider)
//!     .ok_or_else(|| AppError::ValidationError("설정되지 않은 제공자".to_string()))?;
//!
//! let secret = JwtConfig::secret();
//! let hours = JwtConfig::expiration_hours();
//! ```

use std::env;
use std::fmt;

/// JWT 개발용 기본 시크릿 (catalog-api 개발 설정과 동일)
const DEFAULT_DEV_JWT_SECRET: &str = "mySecretKey1234567890123456789012345678901234567890";

/// JWT 토큰 설정을 관리하는 구조체
///
/// 발급한 액세스 토큰은 catalog-api가 같은 시크릿으로 검증하므로
/// 두 서비스의 `JWT_SECRET`은 반드시 일치해야 합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// HS256 서명용 시크릿을 반환합니다.
    ///
    /// 설정되지 않은 경우 개발용 기본값을 사용하며 경고를 남깁니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                DEFAULT_DEV_JWT_SECRET.to_string()
            })
    }

    /// 액세스 토큰 유효 시간 (시간 단위, 기본값: 24)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }
}

/// OAuth 공통 설정
pub struct OAuthConfig;

impl OAuthConfig {
    /// 발급한 state가 유효한 시간 (분 단위, 기본값: 10, 최대 1440)
    ///
    /// 이 시간이 지나면 콜백에서 해당 state를 거부합니다. 범위를 벗어난 값은 기본값을 사용합니다.
    pub fn state_timeout_minutes() -> i64 {
        env::var("OAUTH_STATE_TIMEOUT_MINUTES")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .filter(|minutes| (1..=1440).contains(minutes))
            .unwrap_or(10)
    }
}

/// 제공자별 OAuth 2.0 클라이언트 설정
///
/// `<PREFIX>_CLIENT_ID` 등 제공자 접두사가 붙은 환경 변수에서 읽습니다.
/// `client_secret`은 로그에 출력하지 마세요.
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorization_uri: String,
    pub token_uri: String,
    pub user_info_uri: String,
    pub scope: String,
}

impl OAuthClientConfig {
    /// 환경 변수에서 제공자 설정을 읽습니다.
    ///
    /// # Returns
    ///
    /// - `Some(config)` - `<PREFIX>_CLIENT_ID`가 설정된 경우
    /// - `None` - 설정되지 않았거나 OAuth를 사용하지 않는 제공자(`dev`)인 경우
    pub fn from_env(provider: &AuthProvider) -> Option<Self> {
        Self::from_lookup(provider, |key| env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정을 구성합니다.
    pub fn from_lookup<F>(provider: &AuthProvider, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ProviderDefaults::for_provider(provider)?;
        let prefix = defaults.env_prefix;

        let read = |name: &str| {
            lookup(&format!("{}_{}", prefix, name))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let client_id = read("CLIENT_ID")?;

        Some(Self {
            client_id,
            client_secret: read("CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: read("REDIRECT_URI").unwrap_or_else(|| {
                format!("http://localhost:8080/api/auth/oauth2/{}/callback", provider.as_str())
            }),
            authorization_uri: read("AUTH_URI").unwrap_or_else(|| defaults.authorization_uri.to_string()),
            token_uri: read("TOKEN_URI").unwrap_or_else(|| defaults.token_uri.to_string()),
            user_info_uri: read("USER_INFO_URI").unwrap_or_else(|| defaults.user_info_uri.to_string()),
            scope: read("SCOPE").unwrap_or_else(|| defaults.scope.to_string()),
        })
    }
}

/// 제공자별 공개 엔드포인트 기본값
struct ProviderDefaults {
    env_prefix: &'static str,
    authorization_uri: &'static str,
    token_uri: &'static str,
    user_info_uri: &'static str,
    scope: &'static str,
}

impl ProviderDefaults {
    fn for_provider(provider: &AuthProvider) -> Option<Self> {
        match provider {
            AuthProvider::Google => Some(Self {
                env_prefix: "GOOGLE",
                authorization_uri: "https://accounts.google.com/o/oauth2/v2/auth",
                token_uri: "https://oauth2.googleapis.com/token",
                user_info_uri: "https://www.googleapis.com/oauth2/v2/userinfo",
                scope: "email profile",
            }),
            AuthProvider::Naver => Some(Self {
                env_prefix: "NAVER",
                authorization_uri: "https://nid.naver.com/oauth2.0/authorize",
                token_uri: "https://nid.naver.com/oauth2.0/token",
                user_info_uri: "https://openapi.naver.com/v1/nid/me",
                scope: "name email profile_image",
            }),
            AuthProvider::Dev => None,
        }
    }
}

/// 사용자 계정의 인증 공급자
///
/// MongoDB와 JSON에는 소문자(`google`, `naver`, `dev`)로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,

    Naver,

    /// 개발용 로그인으로 생성된 계정
    Dev,
}

impl AuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "naver" => Ok(AuthProvider::Naver),
            "dev" => Ok(AuthProvider::Dev),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Naver => "naver",
            AuthProvider::Dev => "dev",
        }
    }

    /// 외부 OAuth 로그인을 거치는 제공자인지 여부
    pub fn is_oauth(&self) -> bool {
        !matches!(self, AuthProvider::Dev)
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("google").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("naver").unwrap(), AuthProvider::Naver);
        assert_eq!(AuthProvider::from_str("dev").unwrap(), AuthProvider::Dev);

        // 대소문자 무관 테스트
        assert_eq!(AuthProvider::from_str("GOOGLE").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("Naver").unwrap(), AuthProvider::Naver);

        assert!(AuthProvider::from_str("kakao").is_err());
        assert!(AuthProvider::from_str("").is_err());
    }

    #[test]
    fn test_auth_provider_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AuthProvider::Naver).unwrap(), "\"naver\"");
        let parsed: AuthProvider = serde_json::from_str("\"dev\"").unwrap();
        assert_eq!(parsed, AuthProvider::Dev);
        assert_eq!(AuthProvider::Google.to_string(), "google");
    }

    #[test]
    fn test_client_config_requires_client_id() {
        let lookup = lookup_from(&[("GOOGLE_CLIENT_SECRET", "secret")]);
        assert!(OAuthClientConfig::from_lookup(&AuthProvider::Google, lookup).is_none());
    }

    #[test]
    fn test_client_config_uses_provider_defaults() {
        let lookup = lookup_from(&[("NAVER_CLIENT_ID", "naver-id"), ("NAVER_CLIENT_SECRET", "naver-secret")]);
        let config = OAuthClientConfig::from_lookup(&AuthProvider::Naver, lookup).unwrap();

        assert_eq!(config.client_id, "naver-id");
        assert_eq!(config.client_secret, "naver-secret");
        assert_eq!(config.authorization_uri, "https://nid.naver.com/oauth2.0/authorize");
        assert_eq!(config.token_uri, "https://nid.naver.com/oauth2.0/token");
        assert_eq!(config.user_info_uri, "https://openapi.naver.com/v1/nid/me");
        assert_eq!(config.redirect_uri, "http://localhost:8080/api/auth/oauth2/naver/callback");
    }

    #[test]
    fn test_client_config_overrides() {
        let lookup = lookup_from(&[
            ("GOOGLE_CLIENT_ID", "google-id"),
            ("GOOGLE_TOKEN_URI", "http://127.0.0.1:9999/token"),
            ("GOOGLE_SCOPE", "openid email"),
        ]);
        let config = OAuthClientConfig::from_lookup(&AuthProvider::Google, lookup).unwrap();

        assert_eq!(config.token_uri, "http://127.0.0.1:9999/token");
        assert_eq!(config.scope, "openid email");
        assert_eq!(config.user_info_uri, "https://www.googleapis.com/oauth2/v2/userinfo");
    }

    #[test]
    fn test_dev_provider_has_no_oauth_client() {
        let lookup = lookup_from(&[("DEV_CLIENT_ID", "whatever")]);
        assert!(OAuthClientConfig::from_lookup(&AuthProvider::Dev, lookup).is_none());
        assert!(!AuthProvider::Dev.is_oauth());
    }

    #[test]
    fn test_default_dev_secret_is_hs256_sized() {
        assert!(DEFAULT_DEV_JWT_SECRET.len() >= 32);
    }
}
