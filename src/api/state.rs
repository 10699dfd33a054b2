//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use super::middleware::AccessPolicy;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{
    Cache, Database, HealthCheck, HttpImageStore, Persistence, RedisSessionStore, SessionStore,
};
use crate::services::{AuthService, PropertyService, ServiceContainer, Services, UserService};

/// HTTP-level settings taken from the configuration
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Add `Secure` to the session cookie
    pub cookie_secure: bool,
    /// Session lifetime, mirrored in the cookie `Max-Age`
    pub session_ttl_seconds: u64,
    /// Request body limit for multipart forms
    pub max_upload_bytes: usize,
}

impl From<&Config> for HttpSettings {
    fn from(config: &Config) -> Self {
        Self {
            cookie_secure: config.cookie_secure,
            session_ttl_seconds: config.session_ttl_seconds,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Property service
    pub property_service: Arc<dyn PropertyService>,
    /// Server-side sessions
    pub sessions: Arc<dyn SessionStore>,
    /// Ordered access rules applied to every request
    pub policy: Arc<AccessPolicy>,
    /// Dependencies reported by `/health`
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    pub settings: HttpSettings,
}

impl AppState {
    /// Create application state with injected services and session store.
    pub fn new(
        services: &dyn ServiceContainer,
        sessions: Arc<dyn SessionStore>,
        health_checks: Vec<Arc<dyn HealthCheck>>,
        settings: HttpSettings,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            property_service: services.properties(),
            sessions,
            policy: Arc::new(AccessPolicy::standard()),
            health_checks,
            settings,
        }
    }

    /// Create application state backed by Postgres, Redis and the HTTP image store.
    pub fn from_config(database: Database, cache: Cache, config: &Config) -> AppResult<Self> {
        let uow = Arc::new(Persistence::new(database.get_connection()));
        let image_store = Arc::new(HttpImageStore::from_config(config)?);
        let services = Services::from_parts(uow, image_store);

        let sessions = Arc::new(RedisSessionStore::new(cache, config.session_ttl_seconds));
        let health_checks: Vec<Arc<dyn HealthCheck>> =
            vec![Arc::new(database), sessions.clone()];

        Ok(Self::new(
            &services,
            sessions,
            health_checks,
            HttpSettings::from(config),
        ))
    }
}
