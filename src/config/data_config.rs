//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, Rate Limiting, 사용자 저장소 백엔드,
//! 개발용 엔드포인트, catalog-api 연동 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// if Environment::current() == Environment::Production {
    ///     log::info!("프로덕션 모드");
    /// }
    /// ```
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다.
    ///
    /// # Environment Variables
    ///
    /// - `PORT`: 커스텀 포트 설정 (기본값: 8080)
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다.
    ///
    /// # Environment Variables
    ///
    /// - `HOST`: 커스텀 호스트 설정 (기본값: "0.0.0.0")
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// `host:port` 형식의 바인딩 주소
    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    /// Actix 워커 스레드 수 (`SERVER_WORKERS`, 기본값: 4)
    pub fn workers() -> usize {
        env::var("SERVER_WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(4)
    }

    /// CORS 허용 Origin 목록을 반환합니다.
    ///
    /// `CORS_ALLOWED_ORIGINS`는 쉼표로 구분된 목록이며,
    /// 설정되지 않은 경우 로컬 개발 서버 주소들을 허용합니다.
    ///
    /// ```bash
    /// export CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
    /// ```
    pub fn cors_allowed_origins() -> Vec<String> {
        match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다.
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    ///
    /// ```bash
    /// # .env.dev
    /// RATE_LIMIT_PER_SECOND=20
    /// RATE_LIMIT_BURST_SIZE=40
    /// ```
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        let config = Self { per_second, burst_size };
        log::info!("Rate Limiting 설정 로드됨: {:?}", config);
        config
    }
}

/// 사용자 저장소 백엔드 종류
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreBackend {
    /// MongoDB + Redis 캐시
    Mongo,
    /// 프로세스 메모리 (로컬 실행, 테스트)
    Memory,
}

impl StoreBackend {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StoreBackend::Memory,
            _ => StoreBackend::Mongo,
        }
    }
}

/// 저장소 설정
pub struct StorageConfig;

impl StorageConfig {
    /// `USER_STORE` 환경 변수로 저장소 백엔드를 선택합니다. (기본값: mongo)
    pub fn backend() -> StoreBackend {
        env::var("USER_STORE")
            .map(|v| StoreBackend::from_str(&v))
            .unwrap_or(StoreBackend::Mongo)
    }

    /// MongoDB 연결 URI (`MONGODB_URI`, 기본값: `mongodb://localhost:27017`)
    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    /// 사용자 컬렉션이 위치한 데이터베이스 이름 (`DATABASE_NAME`, 기본값: `user_api`)
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "user_api".to_string())
    }

    /// Redis 연결 URL (`REDIS_URL`, 기본값: `redis://localhost:6379`)
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}

/// 개발용 엔드포인트(`/api/dev`, `/api/test`) 설정
pub struct DevToolsConfig;

impl DevToolsConfig {
    /// 개발용 엔드포인트 활성화 여부
    ///
    /// `DEV_ENDPOINTS_ENABLED`가 설정되어 있으면 그 값을 따르고,
    /// 그렇지 않으면 프로덕션이 아닌 환경에서만 활성화합니다.
    pub fn enabled() -> bool {
        Self::resolve(&Environment::current(), env::var("DEV_ENDPOINTS_ENABLED").ok().as_deref())
    }

    fn resolve(environment: &Environment, flag: Option<&str>) -> bool {
        match flag.map(|v| v.trim().to_lowercase()) {
            Some(v) if matches!(v.as_str(), "true" | "1" | "yes" | "on") => true,
            Some(v) if matches!(v.as_str(), "false" | "0" | "no" | "off") => false,
            _ => !environment.is_production(),
        }
    }
}

/// catalog-api 연동 설정
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    /// catalog-api 기본 URL (`CATALOG_API_URL`, 끝의 `/` 제거)
    ///
    /// 설정되지 않은 경우 회원 탈퇴 시 카탈로그 데이터 정리를 건너뜁니다.
    pub base_url: Option<String>,
}

impl CatalogApiConfig {
    pub fn from_env() -> Self {
        let config = Self::from_url(env::var("CATALOG_API_URL").ok().as_deref());

        if config.base_url.is_none() {
            log::warn!("CATALOG_API_URL이 설정되지 않아 탈퇴 시 카탈로그 데이터 정리를 건너뜁니다");
        }

        config
    }

    fn from_url(url: Option<&str>) -> Self {
        let base_url = url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Self { base_url }
    }
}

impl Default for CatalogApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
