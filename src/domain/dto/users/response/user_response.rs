use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;

const WITHDRAWN_EMAIL: &str = "deleted@user.com";
const WITHDRAWN_NICKNAME: &str = "탈퇴한 사용자";
const WITHDRAWN_INTRODUCTION: &str = "탈퇴한 사용자입니다.";

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub nickname: String,
    pub introduction: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    /// 탈퇴한 사용자의 공개 프로필
    ///
    /// id와 가입/수정 시각만 유지하고 나머지는 익명 값으로 대체합니다.
    pub fn withdrawn(user: &User) -> Self {
        Self {
            email: WITHDRAWN_EMAIL.to_string(),
            nickname: WITHDRAWN_NICKNAME.to_string(),
            introduction: Some(WITHDRAWN_INTRODUCTION.to_string()),
            profile_image: None,
            ..Self::from(user)
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            introduction: user.introduction.clone(),
            profile_image: user.profile_image.clone(),
            created_at: to_utc(user.created_at),
            updated_at: to_utc(user.updated_at),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

fn to_utc(value: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// 로그인 응답 DTO
///
/// ```json
/// {
///   "accessToken": "eyJ...",
///   "tokenType": "Bearer",
///   "expiresIn": 86400,
///   "user": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// 토큰 유효 시간 (초)
    pub expires_in: i64,
    pub user: UserResponse,
}

impl LoginResponse {
    pub fn new(user: UserResponse, access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use mongodb::bson::oid::ObjectId;

    fn saved_user() -> User {
        let mut user = User::new_oauth(
            AuthProvider::Google,
            "g-1".to_string(),
            "real@example.com".to_string(),
            "실명".to_string(),
            Some("https://img.example.com/me.png".to_string()),
        );
        user.id = Some(ObjectId::new());
        user.introduction = Some("소개".to_string());
        user
    }

    #[test]
    fn test_user_response_serializes_camel_case() {
        let user = saved_user();
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(json["id"], user.id_string().unwrap());
        assert_eq!(json["profileImage"], "https://img.example.com/me.png");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("provider").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_withdrawn_response_hides_personal_data() {
        let user = saved_user();
        let response = UserResponse::withdrawn(&user);

        assert_eq!(response.id, user.id_string().unwrap());
        assert_eq!(response.email, "deleted@user.com");
        assert_eq!(response.nickname, "탈퇴한 사용자");
        assert_eq!(response.introduction.as_deref(), Some("탈퇴한 사용자입니다."));
        assert!(response.profile_image.is_none());
        assert_eq!(response.created_at.timestamp_millis(), user.created_at.timestamp_millis());
    }

    #[test]
    fn test_login_response_format() {
        let response = LoginResponse::new(UserResponse::from(saved_user()), "token".to_string(), 86400);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["accessToken"], "token");
        assert_eq!(json["tokenType"], "Bearer");
        assert_eq!(json["expiresIn"], 86400);
        assert_eq!(json["user"]["nickname"], "실명");
    }
}
