//! HTTP request handlers.

pub mod admin_handler;
pub mod api_handler;
pub mod auth_handler;
pub mod property_handler;

pub use admin_handler::admin_routes;
pub use api_handler::{admin_api_routes, property_api_routes, user_api_routes};
pub use auth_handler::auth_routes;
pub use property_handler::property_routes;
