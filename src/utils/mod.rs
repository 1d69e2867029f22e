//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 요청 문자열 검증과 공백 정리
//! - [`display_terminal`] - 서비스 레지스트리 초기화 출력
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{clean_optional_string, validate_required_string};
//!
//! let nickname = validate_required_string(&request.nickname, "닉네임")?;
//! let introduction = clean_optional_string(request.introduction);
//! ```

pub mod string_utils;
pub mod display_terminal;
