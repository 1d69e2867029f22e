//! # 문자열 유틸리티
//!
//! 요청 값의 공백 정리와 필수 값 검증에 사용합니다.

use crate::core::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 앞뒤 공백을 제거한 값을 반환하며, 비어 있으면 `ValidationError`입니다.
///
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  홍길동  ", "닉네임").unwrap(), "홍길동");
/// assert!(validate_required_string("   ", "닉네임").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// 값이 없거나 공백뿐이면 `None`, 아니면 앞뒤 공백을 제거한 값을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
