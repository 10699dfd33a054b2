//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Redis cache and the session store built on it
//! - Remote image storage
//! - Unit of Work for repository access

pub mod cache;
pub mod db;
pub mod health;
pub mod image_store;
pub mod repositories;
pub mod session_store;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use health::HealthCheck;
pub use image_store::{HttpImageStore, ImageStore};
pub use repositories::{PropertyRepository, PropertyStore, UserRepository, UserStore};
pub use session_store::{RedisSessionStore, SessionStore};
pub use unit_of_work::{Persistence, Repositories, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use image_store::MockImageStore;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockPropertyRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use session_store::MockSessionStore;
