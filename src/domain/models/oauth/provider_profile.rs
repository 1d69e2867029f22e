use serde_json::Value;
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};

/// 제공자 사용자 정보에서 추출한 표준 프로필
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    pub provider_id: String,
    pub email: String,
    pub nickname: String,
    pub profile_image: Option<String>,
}

impl ProviderProfile {
    /// 사용자 정보 응답 JSON에서 프로필을 추출합니다.
    ///
    /// # Errors
    ///
    /// - `provider_id` 또는 `email`이 없는 경우 `ExternalServiceError`
    /// - OAuth 제공자가 아닌 경우(`dev`) `ValidationError`
    ///
    /// ```rust,ignore
    /// let info = serde_json::json!({
    ///     "resultcode": "00",
    ///     "response": { "id": "n-1", "email": "a@naver.com", "nickname": "별명" }
    /// });
    /// let profile = ProviderProfile::from_user_info(&AuthProvider::Naver, &info)?;
    /// assert_eq!(profile.nickname, "별명");
    /// ```
    pub fn from_user_info(provider: &AuthProvider, user_info: &Value) -> AppResult<Self> {
        let (provider_id, email, name, picture) = match provider {
            AuthProvider::Google => (
                text(user_info, "id").or_else(|| text(user_info, "sub")),
                text(user_info, "email"),
                text(user_info, "name"),
                text(user_info, "picture"),
            ),
            AuthProvider::Naver => {
                let response = user_info.get("response").ok_or_else(|| {
                    AppError::ExternalServiceError("naver 사용자 정보에 response가 없습니다".to_string())
                })?;
                (
                    text(response, "id"),
                    text(response, "email"),
                    text(response, "name").or_else(|| text(response, "nickname")),
                    text(response, "profile_image"),
                )
            }
            AuthProvider::Dev => {
                return Err(AppError::ValidationError(
                    "dev 제공자는 OAuth 사용자 정보를 지원하지 않습니다".to_string(),
                ));
            }
        };

        let provider_id = provider_id.ok_or_else(|| {
            AppError::ExternalServiceError(format!("{} 사용자 정보에 ID가 없습니다", provider))
        })?;
        let email = email.ok_or_else(|| {
            AppError::ExternalServiceError(format!("{} 사용자 정보에 이메일이 없습니다", provider))
        })?;
        let nickname = name.unwrap_or_else(|| fallback_nickname(&email));

        Ok(Self {
            provider_id,
            email,
            nickname,
            profile_image: picture,
        })
    }
}

/// 문자열 필드를 공백 제거 후 읽습니다. 빈 문자열은 없는 값으로 봅니다.
///
/// Google `id`가 숫자로 오는 경우도 문자열로 변환합니다.
fn text(value: &Value, key: &str) -> Option<String> {
    let raw = match value.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!raw.is_empty()).then_some(raw)
}

/// 이름이 없는 계정은 이메일 로컬 파트를 닉네임으로 사용합니다.
fn fallback_nickname(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
