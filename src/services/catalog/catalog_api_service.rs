//! catalog-api 연동 서비스
//!
//! 회원 탈퇴 시 catalog-api에 남은 사용자 데이터를 정리하도록 요청합니다.
//! catalog-api는 같은 `JWT_SECRET`으로 토큰을 검증하므로, 탈퇴 사용자 명의의 토큰을 새로 발급해
//! `DELETE /api/users/me`를 호출합니다.
//!
//! 정리 요청은 최선 노력(best-effort)입니다. 실패해도 탈퇴 처리는 완료되며 로그만 남깁니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::config::CatalogApiConfig;
use crate::core::errors::{AppError, AppResult};
use crate::services::auth::token_service::TokenService;

#[service(name = "catalog_api")]
pub struct CatalogApiService {
    http_client: reqwest::Client,

    /// `base_url`이 없으면 정리 요청을 보내지 않습니다.
    config: CatalogApiConfig,

    token_service: Arc<TokenService>,
}

impl CatalogApiService {
    /// 지정한 catalog-api 주소로 서비스를 구성합니다.
    pub fn with_base_url(base_url: Option<String>, token_service: Arc<TokenService>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config: CatalogApiConfig { base_url },
            token_service,
        }
    }

    /// 사용자의 catalog 데이터 삭제를 요청합니다.
    ///
    /// 요청이 성공한 경우에만 `true`를 반환하며, 어떤 실패도 호출자에게 전파하지 않습니다.
    pub async fn delete_user_data(&self, user_id: &str) -> bool {
        let Some(base_url) = self.config.base_url.as_deref() else {
            log::debug!("catalog-api 미설정, 사용자 {} 데이터 정리 생략", user_id);
            return false;
        };

        match self.request_delete(base_url, user_id).await {
            Ok(()) => {
                log::info!("catalog-api 사용자 데이터 정리 완료: {}", user_id);
                true
            }
            Err(e) => {
                log::error!("catalog-api 사용자 데이터 정리 실패 ({}): {}", user_id, e);
                false
            }
        }
    }

    async fn request_delete(&self, base_url: &str, user_id: &str) -> AppResult<()> {
        let token = self.token_service.create_token(user_id)?;

        let response = self.http_client
            .delete(format!("{}/api/users/me", base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("catalog-api 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "catalog-api 응답 오류 ({}): {}", status, error_text
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const SECRET: &str = "test-secret-key-that-is-long-enough-123";
    const USER_ID: &str = "65f0c0ffee00000000000001";

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(SECRET, 24).unwrap())
    }

    /// `Authorization: Bearer <token>`의 토큰이 `USER_ID` 명의인지 확인합니다.
    fn bearer_belongs_to_user(req: &HttpMockRequest) -> bool {
        let Some(value) = req.headers.as_ref().and_then(|headers| {
            headers.iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                .map(|(_, value)| value.clone())
        }) else {
            return false;
        };

        let Some(token) = value.strip_prefix("Bearer ") else {
            return false;
        };

        TokenService::new(SECRET, 24)
            .and_then(|tokens| tokens.get_user_id(token))
            .map(|user_id| user_id == USER_ID)
            .unwrap_or(false)
    }

    #[actix_web::test]
    async fn test_delete_user_data_sends_user_token() {
        let server = MockServer::start_async().await;
        let service = CatalogApiService::with_base_url(Some(server.base_url()), token_service());

        let mock = server.mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/users/me")
                .header_exists("authorization")
                .matches(bearer_belongs_to_user);
            then.status(204);
        }).await;

        assert!(service.delete_user_data(USER_ID).await);
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_token_for_another_user_is_not_accepted() {
        let server = MockServer::start_async().await;
        let service = CatalogApiService::with_base_url(Some(server.base_url()), token_service());

        let mock = server.mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/users/me")
                .matches(bearer_belongs_to_user);
            then.status(204);
        }).await;

        assert!(!service.delete_user_data("65f0c0ffee00000000000002").await);
        assert_eq!(mock.hits_async().await, 0);
    }

    #[actix_web::test]
    async fn test_catalog_failure_is_swallowed() {
        let server = MockServer::start_async().await;
        let service = CatalogApiService::with_base_url(Some(server.base_url()), token_service());

        server.mock_async(|when, then| {
            when.method(DELETE).path("/api/users/me");
            then.status(500).body("boom");
        }).await;

        assert!(!service.delete_user_data(USER_ID).await);
    }

    #[actix_web::test]
    async fn test_unreachable_catalog_is_swallowed() {
        let service = CatalogApiService::with_base_url(Some("http://127.0.0.1:1".to_string()), token_service());
        assert!(!service.delete_user_data(USER_ID).await);
    }

    #[actix_web::test]
    async fn test_disabled_without_base_url() {
        let service = CatalogApiService::with_base_url(None, token_service());
        assert!(!service.delete_user_data(USER_ID).await);
    }
}
