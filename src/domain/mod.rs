//! Domain layer - Core business entities and logic
//!
//! Accounts, listings and the moderation status model, independent of
//! persistence and HTTP concerns.

pub mod password;
pub mod principal;
pub mod property;
pub mod user;

pub use password::Password;
pub use principal::Principal;
pub use property::{
    parse_price, valid_price, ImageUpload, NewProperty, Owner, OwnerContact, Property,
    PropertyChanges, PropertyStatus, SearchCriteria,
};
pub use user::{normalize_email, normalize_role, NewUser, Role, User, UserResponse, UserUpdate};
