use serde::{Deserialize, Serialize};

/// 인가 URL 응답
///
/// ```json
/// { "authUrl": "https://accounts.google.com/o/oauth2/v2/auth?...", "state": "uuid" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationUrlResponse {
    pub auth_url: String,
    pub state: String,
}

/// `GET /api/auth/login/{provider}` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUrlResponse {
    pub login_url: String,
    pub message: String,
}

/// `POST /api/test/validate-token` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub message: String,
}

/// 제공자 토큰 엔드포인트 응답
///
/// Naver는 실패 시에도 200과 함께 `error` 필드를 돌려줍니다.
/// 제공자 토큰은 사용자 정보 조회에만 쓰므로 `access_token` 외의 토큰 필드는 읽지 않습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
