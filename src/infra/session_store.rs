//! Server-side session storage.
//!
//! The cookie only carries an opaque session ID; the principal lives in
//! Redis under `session:{id}` and expires with the configured TTL.

use async_trait::async_trait;
use uuid::Uuid;

use super::cache::Cache;
use super::health::HealthCheck;
use crate::config::CACHE_PREFIX_SESSION;
use crate::domain::Principal;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session storage trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session for the principal and return its ID
    async fn create(&self, principal: Principal) -> AppResult<String>;

    /// Resolve a session ID; unknown or expired IDs yield `None`
    async fn get(&self, session_id: &str) -> AppResult<Option<Principal>>;

    /// Invalidate a session; unknown IDs are ignored
    async fn destroy(&self, session_id: &str) -> AppResult<()>;
}

/// Redis-backed session store
pub struct RedisSessionStore {
    cache: Cache,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(cache: Cache, ttl_seconds: u64) -> Self {
        Self { cache, ttl_seconds }
    }

    fn key(session_id: &str) -> String {
        format!("{}{}", CACHE_PREFIX_SESSION, session_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, principal: Principal) -> AppResult<String> {
        let session_id = Uuid::new_v4().simple().to_string();
        self.cache
            .set_with_ttl(&Self::key(&session_id), &principal, self.ttl_seconds)
            .await?;
        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<Principal>> {
        self.cache.get(&Self::key(session_id)).await
    }

    async fn destroy(&self, session_id: &str) -> AppResult<()> {
        self.cache.delete(&Self::key(session_id)).await
    }
}

#[async_trait]
impl HealthCheck for RedisSessionStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn ping(&self) -> AppResult<()> {
        self.cache.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_keys_are_namespaced() {
        assert_eq!(RedisSessionStore::key("abc"), "session:abc");
    }
}
