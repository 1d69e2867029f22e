/// 인증 미들웨어 동작 방식
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthMode {
    /// 유효한 Bearer 토큰이 없으면 401
    Required,
    /// 토큰이 있고 유효할 때만 사용자 정보를 주입
    Optional,
}
