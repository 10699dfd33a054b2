//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach repositories through the Unit of Work.

mod auth_service;
pub mod container;
mod image_service;
mod property_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use image_service::{ImageService, ImageUploader};
pub use property_service::{PropertyManager, PropertyService};
pub use user_service::{UserManager, UserService};
