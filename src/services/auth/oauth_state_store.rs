//! OAuth state 저장소
//!
//! 인가 URL을 발급할 때 만든 state를 콜백까지 보관합니다.
//! 각 state는 만료 시간이 있으며 콜백에서 한 번만 사용할 수 있습니다.
//!
//! 인가 URL 발급은 인증 없이 호출되므로 보관 개수에 상한을 둡니다.
//! 상한에 도달하면 가장 먼저 만료될 state부터 밀어냅니다.

use std::collections::HashMap;
use std::sync::Mutex;
use chrono::{DateTime, Duration, Utc};
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};

/// 콜백을 기다리는 인가 요청
#[derive(Debug, Clone)]
pub struct PendingAuthorization {
    pub provider: AuthProvider,

    /// 토큰 교환 시 인가 요청과 동일하게 보내야 하는 redirect URI
    pub redirect_uri: String,

    expires_at: DateTime<Utc>,
}

impl PendingAuthorization {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// 동시에 보관하는 state 최대 개수
pub const DEFAULT_STATE_CAPACITY: usize = 10_000;

pub struct OAuthStateStore {
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<String, PendingAuthorization>>,
}

impl OAuthStateStore {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_STATE_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// state를 등록합니다. 만료된 항목은 이때 함께 정리됩니다.
    pub fn insert(&self, state: &str, provider: AuthProvider, redirect_uri: String) -> AppResult<()> {
        let now = Utc::now();
        let mut entries = self.lock()?;

        entries.retain(|_, pending| !pending.is_expired(now));

        while entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, pending)| pending.expires_at)
                .map(|(key, _)| key.clone());

            match oldest {
                Some(key) => {
                    entries.remove(&key);
                    log::warn!("OAuth state 보관 한도({}) 도달, 가장 오래된 state 제거", self.capacity);
                }
                None => break,
            }
        }

        entries.insert(state.to_string(), PendingAuthorization {
            provider,
            redirect_uri,
            expires_at: now + self.ttl,
        });

        Ok(())
    }

    /// state를 꺼내고 저장소에서 제거합니다.
    ///
    /// # Errors
    ///
    /// 알 수 없는 state, 만료된 state, 다른 제공자로 발급된 state는
    /// 모두 `AuthenticationError`입니다. 어느 경우든 state는 다시 쓸 수 없습니다.
    pub fn consume(&self, state: &str, provider: &AuthProvider) -> AppResult<PendingAuthorization> {
        let pending = self.lock()?.remove(state).ok_or_else(|| {
            AppError::AuthenticationError("유효하지 않은 state 값입니다".to_string())
        })?;

        if pending.is_expired(Utc::now()) {
            return Err(AppError::AuthenticationError("만료된 state 값입니다. 다시 로그인해주세요".to_string()));
        }

        if pending.provider != *provider {
            log::warn!("state 제공자 불일치: 발급={}, 콜백={}", pending.provider, provider);
            return Err(AppError::AuthenticationError("state 값의 제공자가 일치하지 않습니다".to_string()));
        }

        Ok(pending)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, PendingAuthorization>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::InternalError("OAuth state 저장소 잠금 실패".to_string()))
    }
}
