//! user-api 메인 애플리케이션
//!
//! 사용자 저장소를 선택해 등록하고, 모든 서비스를 초기화한 뒤 Actix-web 서버를 구동합니다.
//!
//! ```text
//! load_env_file → init_logging → 저장소 선택 (mongo | memory)
//!   → ServiceLocator::set(SharedUserStore) → TokenService 검증
//!   → ServiceLocator::initialize_all → HttpServer
//! ```

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use user_api::caching::redis::RedisClient;
use user_api::config::{RateLimitConfig, ServerConfig, StorageConfig, StoreBackend};
use user_api::core::registry::ServiceLocator;
use user_api::db::Database;
use user_api::repositories::users::{InMemoryUserStore, SharedUserStore, UserRepository, UserStore};
use user_api::routes::configure_all_routes;
use user_api::services::auth::TokenService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 user-api 시작중...");

    let store = initialize_user_store().await?;
    ServiceLocator::set(Arc::new(SharedUserStore::new(store)));

    // JWT_SECRET 길이 검증
    TokenService::init().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - Rate Limiting 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = ServerConfig::cors_allowed_origins();
    info!("CORS 허용 Origin: {:?}", allowed_origins);

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => println!(".env.prod 파일 로드 됨"),
            Err(e) => eprintln!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => println!(".env.dev 파일 로드 됨"),
            Err(e) => eprintln!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            println!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=user_api::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// `USER_STORE` 설정에 따라 사용자 저장소를 만듭니다
///
/// MongoDB 연결 실패는 기동 실패이며, Redis 연결 실패 시 캐시 없이 동작합니다.
async fn initialize_user_store() -> io::Result<Arc<dyn UserStore>> {
    match StorageConfig::backend() {
        StoreBackend::Memory => {
            warn!("⚠️ 메모리 사용자 저장소 사용 (재시작 시 데이터가 사라집니다)");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
        StoreBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");

            let database = Arc::new(
                Database::new()
                    .await
                    .map_err(|e| io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?,
            );
            info!("✅ MongoDB 연결 성공");

            let redis_client = match RedisClient::new().await {
                Ok(client) => {
                    info!("✅ Redis 연결 성공");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    error!("Redis 연결 실패, 캐시 없이 동작합니다: {}", e);
                    None
                }
            };

            let repository = UserRepository::new(database, redis_client)
                .await
                .map_err(|e| io::Error::other(e.to_string()))?;

            Ok(Arc::new(repository))
        }
    }
}

/// CORS 설정을 구성합니다
///
/// 허용 Origin은 `CORS_ALLOWED_ORIGINS`에서 읽습니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
