//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{AuthService, ImageService, PropertyService, UserService};
use crate::infra::{ImageStore, UnitOfWork};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get property service
    fn properties(&self) -> Arc<dyn PropertyService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    property_service: Arc<dyn PropertyService>,
}

impl Services {
    /// Wire every service over one Unit of Work and one image store.
    pub fn from_parts<U: UnitOfWork>(uow: Arc<U>, image_store: Arc<dyn ImageStore>) -> Self {
        use super::{Authenticator, ImageUploader, PropertyManager, UserManager};

        let image_service: Arc<dyn ImageService> = Arc::new(ImageUploader::new(image_store));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow.clone())),
            property_service: Arc::new(PropertyManager::new(uow, image_service)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn properties(&self) -> Arc<dyn PropertyService> {
        self.property_service.clone()
    }
}
