//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for the JSON API. Every endpoint is authenticated
//! with the session cookie set by `POST /login`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::api_handler;
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{Owner, Property, PropertyStatus, UserResponse};
use crate::types::MessageResponse;

/// OpenAPI documentation for the estate portal API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Estate Portal API",
        version = "0.1.0",
        description = "Property listings, accounts and admin moderation"
    ),
    paths(
        // Listings
        api_handler::list_properties,
        api_handler::get_property,
        api_handler::create_property,
        api_handler::delete_property,
        // Accounts
        api_handler::list_users,
        api_handler::get_user,
        // Moderation
        api_handler::pending_properties,
        api_handler::approved_properties,
        api_handler::approve_property,
        api_handler::reject_property,
    ),
    components(
        schemas(
            Property,
            PropertyStatus,
            Owner,
            UserResponse,
            MessageResponse,
            api_handler::CreatePropertyRequest,
        )
    ),
    modifiers(&SecurityAddon),
    security(("session_cookie" = [])),
    tags(
        (name = "Properties", description = "Property listings"),
        (name = "Users", description = "Registered accounts"),
        (name = "Moderation", description = "Admin approval workflow")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the session cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}
