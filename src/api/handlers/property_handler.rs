//! Customer listing pages: browse, search, submit, view and edit.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::PropertyForm;
use crate::api::middleware::CurrentUser;
use crate::api::{views, AppState};
use crate::config::PROPERTY_LIST_ROUTE;
use crate::domain::{PropertyStatus, SearchCriteria};
use crate::errors::{AppError, PageResult};

/// Create listing page routes (mounted under `/properties`)
pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/pending", get(pending))
        .route("/form", get(new_form))
        .route("/add", get(new_form))
        .route("/search", get(search))
        .route("/save", post(save))
        .route("/view/:id", get(view))
        .route("/edit/:id", get(edit))
        .route("/update", post(update))
}

/// All listings, or the filtered set when any criterion is given.
async fn list(
    State(state): State<AppState>,
    Query(criteria): Query<SearchCriteria>,
) -> PageResult<Html<String>> {
    let criteria = criteria.normalized();
    let properties = state.property_service.search(criteria.clone()).await?;
    Ok(Html(views::property_list_page(&properties, &criteria)))
}

async fn pending(State(state): State<AppState>) -> PageResult<Html<String>> {
    let properties = state
        .property_service
        .list_by_status(PropertyStatus::Pending)
        .await?;
    Ok(Html(views::property_list_page(
        &properties,
        &SearchCriteria::default(),
    )))
}

async fn new_form() -> Html<String> {
    Html(views::property_form_page(None))
}

async fn search() -> Html<String> {
    Html(views::search_page())
}

async fn save(
    State(state): State<AppState>,
    user: CurrentUser,
    form: PropertyForm,
) -> PageResult<Redirect> {
    let (listing, image) = form.into_new_property();
    state
        .property_service
        .create(listing, user.email(), image)
        .await?;
    Ok(Redirect::to(PROPERTY_LIST_ROUTE))
}

async fn view(State(state): State<AppState>, Path(id): Path<Uuid>) -> PageResult<Html<String>> {
    let property = state
        .property_service
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Property", id))?;
    Ok(Html(views::view_property_page(&property)))
}

/// A missing listing sends the user back to the list.
async fn edit(State(state): State<AppState>, Path(id): Path<Uuid>) -> PageResult<Response> {
    let response = match state.property_service.get(id).await? {
        Some(property) => Html(views::property_form_page(Some(&property))).into_response(),
        None => Redirect::to(PROPERTY_LIST_ROUTE).into_response(),
    };
    Ok(response)
}

async fn update(State(state): State<AppState>, form: PropertyForm) -> PageResult<Redirect> {
    let (id, changes, image) = form.into_changes()?;
    state.property_service.update(id, changes, image).await?;
    Ok(Redirect::to(PROPERTY_LIST_ROUTE))
}
