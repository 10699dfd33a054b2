//! Application route configuration.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    admin_api_routes, admin_routes, auth_routes, property_api_routes, property_routes,
    user_api_routes,
};
use super::middleware::access_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::errors::{AppError, PageError};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.settings.max_upload_bytes;

    Router::new()
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Server-rendered pages
        .merge(auth_routes())
        .nest("/properties", property_routes())
        .nest("/admin", admin_routes())
        // JSON API
        .nest("/api/properties", property_api_routes())
        .nest("/api/users", user_api_routes())
        .nest("/api/admin", admin_api_routes())
        .fallback(not_found)
        // Global middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_middleware,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        AppError::NotFound.into_response()
    } else {
        PageError(AppError::NotFound).into_response()
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: BTreeMap<&'static str, ServiceStatus>,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint pinging every registered dependency
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut services = BTreeMap::new();
    let mut all_healthy = true;

    for check in &state.health_checks {
        let status = match check.ping().await {
            Ok(()) => ServiceStatus {
                status: "healthy",
                error: None,
            },
            Err(e) => {
                tracing::warn!(service = check.name(), "Health check failed: {}", e);
                all_healthy = false;
                ServiceStatus {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                }
            }
        };
        services.insert(check.name(), status);
    }

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services,
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
