//! Repository layer - Data access abstraction
//!
//! One explicit query per operation; no convention-derived finders.

pub(crate) mod entities;
mod property_repository;
mod user_repository;

pub use property_repository::{PropertyRepository, PropertyStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use property_repository::MockPropertyRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
