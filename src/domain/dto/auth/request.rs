use serde::Deserialize;
use validator::Validate;

/// 인가 URL 요청 쿼리 (`GET /api/auth/oauth2/{provider}/authorize?baseUrl=`)
///
/// 에뮬레이터(`http://10.0.2.2:8080`)처럼 접속 주소가 다른 클라이언트는
/// `baseUrl`을 넘겨 콜백 주소를 자신에게 맞춥니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeQuery {
    #[validate(url(message = "유효한 baseUrl이 아닙니다"))]
    pub base_url: Option<String>,
}

/// 제공자 콜백 쿼리 (`GET /api/auth/oauth2/{provider}/callback`)
///
/// 사용자가 동의를 거부하면 `code` 대신 `error`가 전달됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// 토큰 검증 요청 (`POST /api/test/validate-token`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidateTokenRequest {
    pub token: Option<String>,
}

/// 테스트 토큰 발급 요청 (`POST /api/test/create-token`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateTestTokenRequest {
    pub email: Option<String>,
    pub nickname: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_query_base_url() {
        let query: AuthorizeQuery = serde_json::from_str(r#"{"baseUrl": "http://10.0.2.2:8080"}"#).unwrap();
        assert_eq!(query.base_url.as_deref(), Some("http://10.0.2.2:8080"));
        assert!(query.validate().is_ok());

        let invalid = AuthorizeQuery { base_url: Some("not a url".to_string()) };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_callback_query_with_provider_error() {
        let query: OAuthCallbackQuery =
            serde_json::from_str(r#"{"error": "access_denied", "state": "abc"}"#).unwrap();
        assert!(query.code.is_none());
        assert_eq!(query.error.as_deref(), Some("access_denied"));
    }
}
