use serde::{Deserialize, Serialize};

/// JWT 액세스 토큰 페이로드
///
/// catalog-api는 `sub`만 읽어 사용자 ID로 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID (ObjectId hex)
    pub sub: String,
    /// 발급 시각 (Unix seconds)
    pub iat: i64,
    /// 만료 시각 (Unix seconds)
    pub exp: i64,
}
