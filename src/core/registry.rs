//! # Service Registry
//!
//! 타입 기반 싱글톤 레지스트리입니다.
//! 인프라 객체(데이터베이스, Redis, 사용자 저장소)는 `main`에서 [`ServiceLocator::set`]으로 등록하고,
//! 서비스는 각 모듈에서 `inventory::submit!`으로 [`ServiceRegistration`]을 제출합니다.
//!
//! ```text
//! main ──set──► ServiceLocator ◄──get── UserService::instance()
//!                    ▲
//!                    │ inventory::iter::<ServiceRegistration>()
//!          token / oauth / user / catalog_api 서비스 생성자
//! ```
//!
//! ## 서비스 등록 패턴
//!
//! 의존성이 모두 `Arc<T>`로 주입되는 서비스는 `#[service]`를 사용합니다.
//! 매크로가 `OnceCell` 싱글톤, `instance()`, `inventory` 등록, [`Service`] 구현을 생성하며
//! `Arc<T>` 필드는 `ServiceLocator::get::<T>()`로, 나머지 필드는 `Default::default()`로 채웁니다.
//!
//! ```rust,ignore
//! #[service(name = "user")]
//! pub struct UserService {
//!     store: Arc<SharedUserStore>,
//!     catalog: Arc<CatalogApiService>,
//! }
//! ```
//!
//! 생성이 실패할 수 있거나 필드를 설정에서 직접 만들어야 하는 서비스(`TokenService`, `OAuthService`)는
//! 같은 형태를 직접 작성합니다.
//!
//! ```rust,ignore
//! static TOKEN_SERVICE_INSTANCE: OnceCell<Arc<TokenService>> = OnceCell::new();
//!
//! fn token_service_constructor() -> Box<dyn Any + Send + Sync> {
//!     Box::new(TokenService::instance())
//! }
//!
//! inventory::submit! {
//!     ServiceRegistration { name: "token_service", constructor: token_service_constructor }
//! }
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// `#[service]` 매크로가 구현하는 서비스 공통 인터페이스
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리 등록 이름 (`user_service` 등)
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 자동 등록 정보
///
/// `constructor`는 `Box<Arc<T>>`를 `Box<dyn Any>`로 감싸 반환해야 합니다.
pub struct ServiceRegistration {
    /// `<이름>_service` 형식의 등록 이름
    pub name: &'static str,
    /// 싱글톤 인스턴스를 반환하는 생성자
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

// 컴파일 타임에 모든 ServiceRegistration을 수집합니다.
inventory::collect!(ServiceRegistration);

/// "oauth_service" -> "oauth" 형식의 이름 캐시
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let mut cache = HashMap::new();

    for registration in inventory::iter::<ServiceRegistration>() {
        cache.insert(registration_key(registration.name), registration);
    }

    print_cache_initialized("Service", cache.len());
    cache
});

/// 등록 이름에서 `_service` 접미사와 밑줄을 제거합니다.
fn registration_key(name: &str) -> String {
    name.strip_suffix("_service")
        .unwrap_or(name)
        .replace('_', "")
        .to_lowercase()
}

/// 전역 싱글톤 레지스트리
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 등록된 인스턴스를 반환합니다.
    ///
    /// 직접 등록된 인스턴스가 없으면 타입 이름(`UserService` → `user`)으로
    /// [`ServiceRegistration`]을 찾아 생성합니다.
    ///
    /// # Panics
    ///
    /// - 순환 의존성이 감지된 경우
    /// - 등록되지 않은 타입을 요청한 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::try_get::<T>() {
            return instance;
        }

        let type_id = TypeId::of::<T>();
        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let created = Self::create_from_registration::<T>(type_name);

        LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner()).remove(&type_id);

        match created {
            Some(instance) => {
                LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner())
                    .insert(type_id, instance.clone() as Arc<dyn Any + Send + Sync>);
                instance
            }
            None => panic!(
                "Service not found: {}. Register it with inventory::submit! or ServiceLocator::set()",
                type_name
            ),
        }
    }

    /// 이미 등록된 인스턴스가 있으면 반환합니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    fn create_from_registration<T: 'static + Send + Sync>(type_name: &str) -> Option<Arc<T>> {
        let clean_name = Self::extract_clean_type_name(type_name);
        let key = clean_name
            .strip_suffix("Service")
            .unwrap_or(&clean_name)
            .to_lowercase();

        let registration = SERVICE_NAME_CACHE.get(&key)?;
        (registration.constructor)()
            .downcast::<Arc<T>>()
            .ok()
            .map(|boxed| *boxed)
    }

    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }

    /// 인스턴스를 직접 등록합니다.
    ///
    /// 트레이트 객체는 `SharedUserStore`처럼 크기가 정해진 타입으로 감싸 등록합니다.
    ///
    /// ```rust,ignore
    /// let store = SharedUserStore::new(Arc::new(InMemoryUserStore::new()));
    /// ServiceLocator::set(Arc::new(store));
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        log::debug!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 서비스를 미리 생성합니다.
    ///
    /// 설정 오류(JWT 시크릿 길이 등)를 첫 요청이 아니라 기동 시점에 드러내기 위해 호출합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = registrations.len();

        print_step_start(1, "Creating Service instances");
        for registration in registrations {
            print_sub_task(registration.name, "Creating...");
            let _instance = (registration.constructor)();
            print_sub_task(registration.name, "✓ Created");
        }
        print_step_complete(1, "Service instances created", service_count);

        let infrastructure_count = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner()).len();
        print_final_summary(infrastructure_count, service_count);

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    struct RegisteredValue {
        value: u32,
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(RegisteredValue { value: 7 }));

        let first = ServiceLocator::get::<RegisteredValue>();
        let second = ServiceLocator::get::<RegisteredValue>();

        assert_eq!(first.value, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_try_get_unregistered_returns_none() {
        struct NeverRegistered;
        assert!(ServiceLocator::try_get::<NeverRegistered>().is_none());
    }

    #[test]
    fn test_registration_key() {
        assert_eq!(registration_key("oauth_service"), "oauth");
        assert_eq!(registration_key("catalog_api_service"), "catalogapi");
        assert_eq!(registration_key("user"), "user");
    }

    #[test]
    fn test_extract_clean_type_name() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name("user_api::services::users::user_service::UserService"),
            "UserService"
        );
        assert_eq!(ServiceLocator::extract_clean_type_name("Plain"), "Plain");
    }
}
