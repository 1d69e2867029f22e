//! MongoDB 연결 관리
//!
//! `USER_STORE=mongo`일 때만 연결합니다. 연결 정보는 [`StorageConfig`]에서 읽습니다.
//!
//! ```bash
//! MONGODB_URI=mongodb://localhost:27017
//! DATABASE_NAME=user_api
//! ```

use mongodb::{bson::doc, options::ClientOptions, Client};
use log::info;
use crate::config::StorageConfig;

/// 사용자 저장소가 공유하는 MongoDB 클라이언트
#[derive(Clone)]
pub struct Database {
    client: Client,
    name: String,
}

impl Database {
    /// 연결 후 `ping`으로 서버 가용성을 확인합니다.
    ///
    /// 서버에 닿지 않으면 기동을 중단할 수 있도록 오류를 그대로 반환합니다.
    pub async fn new() -> Result<Self, mongodb::error::Error> {
        Self::connect(&StorageConfig::mongodb_uri(), StorageConfig::database_name()).await
    }

    pub async fn connect(uri: &str, name: String) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        client.database(&name).run_command(doc! { "ping": 1 }).await?;

        info!("MongoDB 데이터베이스 선택: {}", name);
        Ok(Self { client, name })
    }

    /// ```rust,ignore
    /// let users = database.get_database().collection::<User>("users");
    /// ```
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.name)
    }
}
