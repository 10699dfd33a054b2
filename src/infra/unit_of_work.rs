//! Unit of Work: centralized access to every repository.
//!
//! Writes are single-statement and rely on the database for serialization;
//! concurrent status changes resolve last-write-wins.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{PropertyRepository, PropertyStore, UserRepository, UserStore};

/// Repository registry handed to the services.
pub trait UnitOfWork: Send + Sync + 'static {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get property repository
    fn properties(&self) -> Arc<dyn PropertyRepository>;
}

/// Concrete implementation of UnitOfWork over one connection pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
    property_repo: Arc<PropertyStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            property_repo: Arc::new(PropertyStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn properties(&self) -> Arc<dyn PropertyRepository> {
        self.property_repo.clone()
    }
}

/// Unit of Work over arbitrary repository implementations (mocks, fakes).
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub properties: Arc<dyn PropertyRepository>,
}

impl UnitOfWork for Repositories {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn properties(&self) -> Arc<dyn PropertyRepository> {
        self.properties.clone()
    }
}
