//! Admin pages: dashboard, account management and listing moderation.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedForm;
use crate::api::middleware::CurrentUser;
use crate::api::{views, AppState};
use crate::config::{ADMIN_PROPERTIES_ROUTE, ADMIN_USERS_ROUTE};
use crate::domain::UserUpdate;
use crate::errors::{AppError, PageResult};

/// Admin edit of an account
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserForm {
    pub id: Uuid,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 3, message = "Email is required"))]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<UpdateUserForm> for UserUpdate {
    fn from(form: UpdateUserForm) -> Self {
        Self {
            id: form.id,
            full_name: form.full_name,
            email: form.email,
            role: form.role.filter(|r| !r.trim().is_empty()),
            password: form.password,
        }
    }
}

/// Create admin page routes (mounted under `/admin`)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(users))
        .route("/users/edit/:id", get(edit_user))
        .route("/users/update", post(update_user))
        .route("/users/delete/:id", post(delete_user))
        .route("/properties", get(properties))
        .route("/properties/approve/:id", get(approve_property))
        .route("/properties/reject/:id", get(reject_property))
        .route("/properties/delete/:id", get(delete_property))
}

async fn dashboard(State(state): State<AppState>, user: CurrentUser) -> PageResult<Html<String>> {
    let (user_count, property_count) = tokio::try_join!(
        state.user_service.count(),
        state.property_service.count()
    )?;

    Ok(Html(views::admin_dashboard_page(
        user.email(),
        user_count,
        property_count,
    )))
}

async fn users(State(state): State<AppState>) -> PageResult<Html<String>> {
    let users = state.user_service.list().await?;
    Ok(Html(views::admin_users_page(&users)))
}

async fn edit_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> PageResult<Html<String>> {
    let user = state
        .user_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(Html(views::edit_user_page(&user)))
}

async fn update_user(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<UpdateUserForm>,
) -> PageResult<Redirect> {
    state.user_service.update(UserUpdate::from(form)).await?;
    Ok(Redirect::to(ADMIN_USERS_ROUTE))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> PageResult<Redirect> {
    state.user_service.delete(id).await?;
    Ok(Redirect::to(ADMIN_USERS_ROUTE))
}

async fn properties(State(state): State<AppState>) -> PageResult<Html<String>> {
    let properties = state.property_service.list_all().await?;
    Ok(Html(views::admin_properties_page(&properties)))
}

async fn approve_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> PageResult<Redirect> {
    state.property_service.approve(id).await?;
    Ok(Redirect::to(ADMIN_PROPERTIES_ROUTE))
}

async fn reject_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> PageResult<Redirect> {
    state.property_service.reject(id).await?;
    Ok(Redirect::to(ADMIN_PROPERTIES_ROUTE))
}

async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> PageResult<Redirect> {
    state.property_service.delete(id).await?;
    Ok(Redirect::to(ADMIN_PROPERTIES_ROUTE))
}
