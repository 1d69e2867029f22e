//! 외부 catalog-api 연동 서비스

pub mod catalog_api_service;

pub use catalog_api_service::*;
