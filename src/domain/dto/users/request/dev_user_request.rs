use serde::Deserialize;
use validator::Validate;

/// 개발용 간편 로그인 요청 (`POST /api/auth/dev-login`)
///
/// 이메일과 닉네임이 모두 있어야 하며, 누락 시 400을 반환합니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DevLoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(length(max = 50, message = "닉네임은 50자 이하여야 합니다"))]
    pub nickname: Option<String>,
}

/// 개발용 사용자 생성 요청 (`POST /api/dev/create-user`)
///
/// 두 필드 모두 선택이며, 비어 있으면 `dev@example.com` / `개발자`를 사용합니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateDevUserRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(length(max = 50, message = "닉네임은 50자 이하여야 합니다"))]
    pub nickname: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_login_rejects_malformed_email() {
        let request = DevLoginRequest {
            email: Some("not-an-email".to_string()),
            nickname: Some("개발자".to_string()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_dev_user_accepts_empty_body() {
        let request: CreateDevUserRequest = serde_json::from_str("{}").unwrap();
        assert!(request.email.is_none());
        assert!(request.nickname.is_none());
        assert!(request.validate().is_ok());
    }
}
