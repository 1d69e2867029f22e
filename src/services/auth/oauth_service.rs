//! # OAuth 2.0 로그인 서비스
//!
//! Google과 Naver의 Authorization Code 플로우를 처리합니다.
//!
//! ## 플로우
//!
//! ```text
//! 1. GET /api/auth/oauth2/{provider}/authorize
//!    └─ authorization_url() → {authUrl, state}, state 저장
//! 2. 사용자가 제공자 로그인 후 redirect_uri로 돌아옴 (?code&state)
//! 3. GET /api/auth/oauth2/{provider}/callback
//!    └─ authenticate()
//!        ├─ state 소비 (1회용, 만료 확인)
//!        ├─ exchange_code_for_token() : 토큰 엔드포인트에 form POST
//!        ├─ fetch_user_info()         : 사용자 정보 엔드포인트에 Bearer GET
//!        └─ ProviderProfile::from_user_info()
//! ```
//!
//! 계정 생성/갱신은 [`UserService::process_oauth_user`](crate::services::users::user_service::UserService::process_oauth_user)가 담당합니다.
//!
//! ## 제공자 설정
//!
//! `GOOGLE_CLIENT_ID`, `NAVER_CLIENT_ID`가 없는 제공자는 비활성화되며,
//! 해당 제공자로 요청하면 400을 반환합니다.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::Duration;
use once_cell::sync::OnceCell;
use serde_json::Value;
use uuid::Uuid;
use crate::{
    config::{AuthProvider, OAuthClientConfig, OAuthConfig},
    core::errors::{AppError, AppResult},
    domain::{AuthorizationUrlResponse, ProviderProfile, ProviderTokenResponse},
};
use super::oauth_state_store::OAuthStateStore;

pub struct OAuthService {
    http_client: reqwest::Client,
    clients: HashMap<AuthProvider, OAuthClientConfig>,
    states: OAuthStateStore,
}

// 주입받는 의존성이 없고 모든 필드를 제공자 설정에서 만들므로 `#[service]` 대신 직접 싱글톤을 구성합니다.
static OAUTH_SERVICE_INSTANCE: OnceCell<Arc<OAuthService>> = OnceCell::new();

impl OAuthService {
    pub fn instance() -> Arc<Self> {
        OAUTH_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::from_config()))
            .clone()
    }

    /// 환경 변수에 설정된 제공자만 등록합니다.
    pub fn from_config() -> Self {
        let clients = [AuthProvider::Google, AuthProvider::Naver]
            .into_iter()
            .filter_map(|provider| {
                let client = OAuthClientConfig::from_env(&provider);
                if client.is_none() {
                    log::warn!("{} OAuth 클라이언트가 설정되지 않아 비활성화됩니다", provider);
                }
                client.map(|client| (provider, client))
            })
            .collect();

        Self::new(clients, Duration::minutes(OAuthConfig::state_timeout_minutes()))
    }

    pub fn new(clients: HashMap<AuthProvider, OAuthClientConfig>, state_ttl: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            clients,
            states: OAuthStateStore::new(state_ttl),
        }
    }

    /// 제공자의 클라이언트 설정을 반환합니다.
    ///
    /// # Errors
    ///
    /// 설정되지 않은 제공자이거나 `dev`인 경우 `ValidationError`
    pub fn client(&self, provider: &AuthProvider) -> AppResult<&OAuthClientConfig> {
        self.clients.get(provider).ok_or_else(|| {
            AppError::ValidationError(format!("지원하지 않는 OAuth2 제공자입니다: {}", provider))
        })
    }

    /// 인가 URL과 state를 발급합니다.
    ///
    /// `base_url`이 주어지면 redirect URI를 `<base_url>/api/auth/oauth2/<provider>/callback`으로 만들고,
    /// 없으면 설정된 redirect URI를 사용합니다. 콜백에서 같은 값으로 토큰을 교환합니다.
    ///
    /// ```rust,ignore
    /// let response = OAuthService::instance()
    ///     .authorization_url(&AuthProvider::Google, Some("https://api.example.com"))?;
    /// // response.auth_url:
    /// // https://accounts.google.com/o/oauth2/v2/auth?client_id=...&redirect_uri=https%3A%2F%2Fapi.example.com%2Fapi%2Fauth%2Foauth2%2Fgoogle%2Fcallback&...
    /// ```
    pub fn authorization_url(
        &self,
        provider: &AuthProvider,
        base_url: Option<&str>,
    ) -> AppResult<AuthorizationUrlResponse> {
        let client = self.client(provider)?;

        let redirect_uri = match base_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(base_url) => format!(
                "{}/api/auth/oauth2/{}/callback",
                base_url.trim_end_matches('/'),
                provider.as_str()
            ),
            None => client.redirect_uri.clone(),
        };

        let state = Uuid::new_v4().to_string();

        let params = [
            ("client_id", client.client_id.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", client.scope.as_str()),
            ("state", state.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let auth_url = format!("{}?{}", client.authorization_uri, query_string);

        self.states.insert(&state, *provider, redirect_uri)?;
        log::debug!("{} 인가 URL 발급 (state: {})", provider, state);

        Ok(AuthorizationUrlResponse { auth_url, state })
    }

    /// 인가 코드로 제공자 액세스 토큰을 발급받습니다.
    ///
    /// Naver는 토큰 요청에도 `state`를 요구하므로 함께 전송합니다.
    ///
    /// # Errors
    ///
    /// - 제공자가 4xx를 반환하거나 응답 본문에 `error`가 있는 경우 `AuthenticationError`
    /// - 네트워크 오류, 5xx, 해석할 수 없는 응답은 `ExternalServiceError`
    pub async fn exchange_code_for_token(
        &self,
        provider: &AuthProvider,
        code: &str,
        redirect_uri: &str,
        state: Option<&str>,
    ) -> AppResult<String> {
        let client = self.client(provider)?;

        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
        ];
        if let (AuthProvider::Naver, Some(state)) = (provider, state) {
            params.push(("state", state));
        }

        let response = self.http_client
            .post(&client.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", provider, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("{} 토큰 교환 실패 ({}): {}", provider, status, error_text);

            return Err(if status.is_client_error() {
                AppError::AuthenticationError(format!("{} 인가 코드가 유효하지 않습니다", provider))
            } else {
                AppError::ExternalServiceError(format!("{} 토큰 교환 실패: {}", provider, status))
            });
        }

        let token_response = response
            .json::<ProviderTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 응답 파싱 실패: {}", provider, e)))?;

        if let Some(error) = token_response.error {
            log::warn!(
                "{} 토큰 교환 거부: {} ({})",
                provider,
                error,
                token_response.error_description.as_deref().unwrap_or("-")
            );
            return Err(AppError::AuthenticationError(format!("{} 인가 코드가 유효하지 않습니다", provider)));
        }

        token_response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::ExternalServiceError(format!("{} 토큰 응답에 access_token이 없습니다", provider)))
    }

    /// 제공자 액세스 토큰으로 사용자 정보를 조회합니다.
    pub async fn fetch_user_info(&self, provider: &AuthProvider, access_token: &str) -> AppResult<Value> {
        let client = self.client(provider)?;

        let response = self.http_client
            .get(&client.user_info_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 요청 실패: {}", provider, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 사용자 정보 조회 실패 ({}): {}", provider, status, error_text
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 파싱 실패: {}", provider, e)))
    }

    /// 콜백의 code/state로 제공자 인증을 완료하고 프로필을 반환합니다.
    pub async fn authenticate(&self, provider: &AuthProvider, code: &str, state: &str) -> AppResult<ProviderProfile> {
        self.client(provider)?;
        let pending = self.states.consume(state, provider)?;

        let access_token = self
            .exchange_code_for_token(provider, code, &pending.redirect_uri, Some(state))
            .await?;
        let user_info = self.fetch_user_info(provider, &access_token).await?;

        let profile = ProviderProfile::from_user_info(provider, &user_info)?;
        log::info!("{} 인증 성공: {}", provider, profile.email);

        Ok(profile)
    }
}

fn oauth_service_constructor() -> Box<dyn Any + Send + Sync> {
    Box::new(OAuthService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "oauth_service",
        constructor: oauth_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_config(server: &MockServer, provider: &AuthProvider) -> OAuthClientConfig {
        OAuthClientConfig {
            client_id: format!("{}-client", provider),
            client_secret: format!("{}-secret", provider),
            redirect_uri: format!("http://localhost:8080/api/auth/oauth2/{}/callback", provider),
            authorization_uri: server.url("/authorize"),
            token_uri: server.url("/token"),
            user_info_uri: server.url("/userinfo"),
            scope: "email profile".to_string(),
        }
    }

    fn service_for(server: &MockServer, provider: AuthProvider) -> OAuthService {
        let mut clients = HashMap::new();
        clients.insert(provider, client_config(server, &provider));
        OAuthService::new(clients, Duration::minutes(10))
    }

    #[test]
    fn test_authorization_url_uses_configured_redirect() {
        let server = MockServer::start();
        let service = service_for(&server, AuthProvider::Google);

        let response = service.authorization_url(&AuthProvider::Google, None).unwrap();

        assert!(response.auth_url.starts_with(&server.url("/authorize?")));
        assert!(response.auth_url.contains("client_id=google-client"));
        assert!(response.auth_url.contains("response_type=code"));
        assert!(response.auth_url.contains("scope=email%20profile"));
        assert!(response.auth_url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fauth%2Foauth2%2Fgoogle%2Fcallback"
        ));
        assert!(response.auth_url.contains(&format!("state={}", response.state)));
        assert!(Uuid::parse_str(&response.state).is_ok());
        assert_eq!(service.states.len(), 1);
    }

    #[test]
    fn test_authorization_url_with_base_url() {
        let server = MockServer::start();
        let service = service_for(&server, AuthProvider::Naver);

        let response = service
            .authorization_url(&AuthProvider::Naver, Some("https://api.example.com/"))
            .unwrap();

        assert!(response.auth_url.contains(
            "redirect_uri=https%3A%2F%2Fapi.example.com%2Fapi%2Fauth%2Foauth2%2Fnaver%2Fcallback"
        ));
    }

    #[test]
    fn test_unconfigured_provider_is_rejected() {
        let server = MockServer::start();
        let service = service_for(&server, AuthProvider::Google);

        assert!(matches!(
            service.authorization_url(&AuthProvider::Naver, None),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            service.authorization_url(&AuthProvider::Dev, None),
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_authenticate_google() {
        let server = MockServer::start_async().await;
        let service = service_for(&server, AuthProvider::Google);
        let issued = service.authorization_url(&AuthProvider::Google, None).unwrap();

        let token_mock = server.mock_async(|when, then| {
            when.method(POST)
                .path("/token")
                .x_www_form_urlencoded_tuple("grant_type", "authorization_code")
                .x_www_form_urlencoded_tuple("code", "auth-code")
                .x_www_form_urlencoded_tuple("client_id", "google-client")
                .x_www_form_urlencoded_tuple("client_secret", "google-secret");
            then.status(200)
                .json_body(json!({ "access_token": "provider-token", "token_type": "Bearer", "expires_in": 3599 }));
        }).await;

        let user_info_mock = server.mock_async(|when, then| {
            when.method(GET)
                .path("/userinfo")
                .header("authorization", "Bearer provider-token");
            then.status(200)
                .json_body(json!({ "id": "g-123", "email": "user@gmail.com", "name": "구글사용자" }));
        }).await;

        let profile = service
            .authenticate(&AuthProvider::Google, "auth-code", &issued.state)
            .await
            .unwrap();

        token_mock.assert_async().await;
        user_info_mock.assert_async().await;
        assert_eq!(profile.provider_id, "g-123");
        assert_eq!(profile.email, "user@gmail.com");
        assert_eq!(profile.nickname, "구글사용자");

        // state는 한 번만 사용 가능
        let replay = service.authenticate(&AuthProvider::Google, "auth-code", &issued.state).await;
        assert!(matches!(replay, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_naver_token_request_includes_state() {
        let server = MockServer::start_async().await;
        let service = service_for(&server, AuthProvider::Naver);

        let token_mock = server.mock_async(|when, then| {
            when.method(POST)
                .path("/token")
                .x_www_form_urlencoded_tuple("state", "naver-state");
            then.status(200).json_body(json!({ "access_token": "naver-token", "expires_in": "3600" }));
        }).await;

        let token = service
            .exchange_code_for_token(&AuthProvider::Naver, "code", "http://localhost/cb", Some("naver-state"))
            .await
            .unwrap();

        token_mock.assert_async().await;
        assert_eq!(token, "naver-token");
    }

    #[actix_web::test]
    async fn test_naver_error_body_is_authentication_error() {
        let server = MockServer::start_async().await;
        let service = service_for(&server, AuthProvider::Naver);

        server.mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({ "error": "invalid_request", "error_description": "no valid data in session" }));
        }).await;

        let result = service
            .exchange_code_for_token(&AuthProvider::Naver, "bad-code", "http://localhost/cb", Some("s"))
            .await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_token_endpoint_failures() {
        let server = MockServer::start_async().await;
        let service = service_for(&server, AuthProvider::Google);

        let rejected = server.mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(400).json_body(json!({ "error": "invalid_grant" }));
        }).await;

        let result = service
            .exchange_code_for_token(&AuthProvider::Google, "used-code", "http://localhost/cb", None)
            .await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
        rejected.delete_async().await;

        server.mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(503).body("unavailable");
        }).await;

        let result = service
            .exchange_code_for_token(&AuthProvider::Google, "code", "http://localhost/cb", None)
            .await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[actix_web::test]
    async fn test_user_info_failure_is_external_error() {
        let server = MockServer::start_async().await;
        let service = service_for(&server, AuthProvider::Google);

        server.mock_async(|when, then| {
            when.method(GET).path("/userinfo");
            then.status(401).body("invalid token");
        }).await;

        let result = service.fetch_user_info(&AuthProvider::Google, "expired").await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[actix_web::test]
    async fn test_authenticate_with_unknown_state() {
        let server = MockServer::start_async().await;
        let service = service_for(&server, AuthProvider::Google);

        let result = service.authenticate(&AuthProvider::Google, "code", "never-issued").await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
