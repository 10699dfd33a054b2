//! Login, registration, logout and the landing pages.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::api::extractors::format_validation_errors;
use crate::api::middleware::{expired_session_cookie, session_cookie, CurrentUser};
use crate::api::{views, AppState};
use crate::config::{LOGGED_OUT_ROUTE, LOGIN_FAILED_ROUTE, LOGIN_ROUTE};
use crate::domain::NewUser;
use crate::errors::{AppError, PageResult};

/// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Flags set by the login redirects
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub logout: Option<String>,
}

fn trimmed_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Invalid email format".into()))
    }
}

/// Registration form fields
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(custom(function = "trimmed_email"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<RegisterForm> for NewUser {
    fn from(form: RegisterForm) -> Self {
        Self {
            full_name: form.full_name,
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password.filter(|c| !c.is_empty()),
            role: form.role,
        }
    }
}

/// Create authentication and landing routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/home", get(home))
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
}

async fn home() -> Html<String> {
    Html(views::home_page())
}

/// Signed-in users are sent to their landing route instead of the form.
async fn login_page(user: Option<CurrentUser>, Query(query): Query<LoginQuery>) -> Response {
    if let Some(user) = user {
        return Redirect::to(user.principal.landing_route()).into_response();
    }
    Html(views::login_page(query.error.is_some(), query.logout.is_some())).into_response()
}

async fn login(
    State(state): State<AppState>,
    previous: Option<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult<Response> {
    let principal = match state.auth_service.login(&form.email, &form.password).await {
        Ok(principal) => principal,
        Err(AppError::InvalidCredentials) => {
            return Ok(Redirect::to(LOGIN_FAILED_ROUTE).into_response())
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(previous) = previous {
        state.sessions.destroy(&previous.session_id).await?;
    }

    let target = principal.landing_route();
    let session_id = state.sessions.create(principal).await?;
    let cookie = session_cookie(
        &session_id,
        state.settings.session_ttl_seconds,
        state.settings.cookie_secure,
    );

    Ok((jar.add(cookie), Redirect::to(target)).into_response())
}

async fn register_page(user: Option<CurrentUser>) -> Response {
    if let Some(user) = user {
        return Redirect::to(user.principal.landing_route()).into_response();
    }
    Html(views::register_page(None)).into_response()
}

/// Form problems re-render the page with the message; anything else is an
/// error page.
async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> PageResult<Response> {
    let outcome = match form.validate() {
        Ok(()) => state.user_service.register(NewUser::from(form)).await,
        Err(e) => Err(AppError::validation(format_validation_errors(&e))),
    };

    match outcome {
        Ok(_) => Ok(Redirect::to(LOGIN_ROUTE).into_response()),
        Err(err @ (AppError::Validation(_) | AppError::Conflict(_))) => {
            let status = err.status();
            Ok((status, Html(views::register_page(Some(&err.to_string())))).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> PageResult<Response> {
    state.sessions.destroy(&user.session_id).await?;
    tracing::info!(user_id = %user.principal.user_id, "Logged out");

    let jar = jar.add(expired_session_cookie(state.settings.cookie_secure));
    Ok((jar, Redirect::to(LOGGED_OUT_ROUTE)).into_response())
}

async fn dashboard(user: CurrentUser) -> Html<String> {
    Html(views::dashboard_page(user.email()))
}
