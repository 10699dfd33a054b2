//! JSON API mirroring the listing, account and moderation pages.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{NewProperty, Property, PropertyStatus, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, MessageResponse, NoContent};

/// Listing submission over the API
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Sea view apartment")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 125000.0)]
    pub price: Option<f64>,
    #[serde(rename = "type", default)]
    #[schema(example = "Sale")]
    pub property_type: String,
    #[serde(default)]
    #[schema(example = "Galle")]
    pub location: String,
    /// Defaults to PENDING
    pub status: Option<PropertyStatus>,
}

/// Create listing API routes (mounted under `/api/properties`)
pub fn property_api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route("/:id", get(get_property).delete(delete_property))
}

/// Create account API routes (mounted under `/api/users`)
pub fn user_api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user))
}

/// Create moderation API routes (mounted under `/api/admin`)
pub fn admin_api_routes() -> Router<AppState> {
    Router::new()
        .route("/properties/pending", get(pending_properties))
        .route("/properties/approved", get(approved_properties))
        .route("/properties/:id/approve", put(approve_property))
        .route("/properties/:id/reject", put(reject_property))
}

/// List every property
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Properties",
    responses(
        (status = 200, description = "All properties", body = Vec<Property>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_properties(State(state): State<AppState>) -> AppResult<Json<Vec<Property>>> {
    Ok(Json(state.property_service.list_all().await?))
}

/// Get a property by ID
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property found", body = Property),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Property>> {
    let property = state
        .property_service
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Property", id))?;
    Ok(Json(property))
}

/// Submit a property owned by the caller
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "Properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_property(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreatePropertyRequest>,
) -> AppResult<Created<Property>> {
    let listing = NewProperty {
        title: payload.title.trim().to_string(),
        description: payload.description,
        price: payload.price,
        property_type: payload.property_type.trim().to_string(),
        location: payload.location.trim().to_string(),
        status: payload.status,
    };

    let property = state
        .property_service
        .create(listing, user.email(), None)
        .await?;

    Ok(Created(property))
}

/// Delete a property; unknown IDs are ignored
#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses((status = 204, description = "Property deleted"))
)]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.property_service.delete(id).await?;
    Ok(NoContent)
}

/// List every account
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "All users", body = Vec<UserResponse>))
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(Json(UserResponse::from(user)))
}

/// Properties awaiting moderation
#[utoipa::path(
    get,
    path = "/api/admin/properties/pending",
    tag = "Moderation",
    responses(
        (status = 200, description = "Pending properties", body = Vec<Property>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn pending_properties(State(state): State<AppState>) -> AppResult<Json<Vec<Property>>> {
    Ok(Json(
        state
            .property_service
            .list_by_status(PropertyStatus::Pending)
            .await?,
    ))
}

/// Approved properties
#[utoipa::path(
    get,
    path = "/api/admin/properties/approved",
    tag = "Moderation",
    responses(
        (status = 200, description = "Approved properties", body = Vec<Property>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn approved_properties(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Property>>> {
    Ok(Json(
        state
            .property_service
            .list_by_status(PropertyStatus::Approved)
            .await?,
    ))
}

fn moderation_result(found: bool, success: &str) -> (StatusCode, Json<MessageResponse>) {
    if found {
        (StatusCode::OK, Json(MessageResponse::new(success)))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("Property not found")),
        )
    }
}

/// Approve a property
#[utoipa::path(
    put,
    path = "/api/admin/properties/{id}/approve",
    tag = "Moderation",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property approved", body = MessageResponse),
        (status = 400, description = "Property not found", body = MessageResponse)
    )
)]
pub async fn approve_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let found = state.property_service.approve(id).await?;
    Ok(moderation_result(found, "Property approved successfully"))
}

/// Reject a property
#[utoipa::path(
    put,
    path = "/api/admin/properties/{id}/reject",
    tag = "Moderation",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property rejected", body = MessageResponse),
        (status = 400, description = "Property not found", body = MessageResponse)
    )
)]
pub async fn reject_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let found = state.property_service.reject(id).await?;
    Ok(moderation_result(found, "Property rejected successfully"))
}
