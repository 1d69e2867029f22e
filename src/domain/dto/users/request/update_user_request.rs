use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 프로필 수정 요청 (`PUT /api/users/me`)
///
/// 값이 있는 필드만 변경하는 부분 업데이트입니다.
///
/// ```json
/// { "nickname": "새닉네임", "introduction": "안녕하세요" }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(max = 50, message = "닉네임은 50자 이하여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub nickname: Option<String>,

    #[validate(length(max = 500, message = "자기소개는 500자 이하여야 합니다"))]
    pub introduction: Option<String>,

    #[validate(length(max = 2048, message = "프로필 이미지 URL이 너무 깁니다"))]
    pub profile_image: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank_nickname")
            .with_message("닉네임은 비어 있을 수 없습니다".into()));
    }
    Ok(())
}
