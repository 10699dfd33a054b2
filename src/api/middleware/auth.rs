//! Session authentication and path-based access control.
//!
//! Every request passes through `access_middleware`, which resolves the
//! session cookie to a principal and then applies the first matching
//! `AccessRule` of the policy.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::CookieBuilder;
use time::Duration;

use crate::api::AppState;
use crate::config::{LOGIN_ROUTE, SESSION_COOKIE_NAME};
use crate::domain::Principal;
use crate::errors::{AppError, AppResult, PageError};

/// Who may reach a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

/// One path pattern and its requirement.
///
/// A pattern ending in `/**` matches the prefix itself and everything
/// below it; any other pattern matches the exact path.
#[derive(Debug, Clone)]
pub struct AccessRule {
    pattern: &'static str,
    access: Access,
}

impl AccessRule {
    pub const fn new(pattern: &'static str, access: Access) -> Self {
        Self { pattern, access }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self.pattern.strip_suffix("/**") {
            Some(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            None => path == self.pattern,
        }
    }
}

/// Ordered rule list, evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    fallback: Access,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>, fallback: Access) -> Self {
        Self { rules, fallback }
    }

    /// Public login, registration, home and assets; admin area; everything
    /// else needs a session.
    pub fn standard() -> Self {
        use Access::*;

        Self::new(
            vec![
                AccessRule::new("/", Public),
                AccessRule::new("/home", Public),
                AccessRule::new("/login", Public),
                AccessRule::new("/register", Public),
                AccessRule::new("/health", Public),
                AccessRule::new("/css/**", Public),
                AccessRule::new("/js/**", Public),
                AccessRule::new("/images/**", Public),
                AccessRule::new("/uploads/**", Public),
                AccessRule::new("/swagger-ui/**", Public),
                AccessRule::new("/api-docs/**", Public),
                AccessRule::new("/admin/**", Admin),
                AccessRule::new("/api/admin/**", Admin),
            ],
            Authenticated,
        )
    }

    /// Requirement for a request path
    pub fn required(&self, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map_or(self.fallback, |rule| rule.access)
    }
}

/// Authenticated session attached to the request by the middleware
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub session_id: String,
    pub principal: Principal,
}

impl CurrentUser {
    pub fn email(&self) -> &str {
        &self.principal.email
    }

    pub fn is_admin(&self) -> bool {
        self.principal.is_admin()
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Read the session ID from the `Cookie` header.
pub fn session_id_from(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Cookie that installs the session.
pub fn session_cookie(session_id: &str, max_age_seconds: u64, secure: bool) -> Cookie<'static> {
    let max_age = i64::try_from(max_age_seconds).unwrap_or(i64::MAX);
    base_cookie(session_id.to_string(), secure)
        .max_age(Duration::seconds(max_age))
        .build()
}

/// Cookie that deletes the session cookie on the client.
pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(String::new(), secure).build();
    cookie.make_removal();
    cookie
}

fn base_cookie(value: String, secure: bool) -> CookieBuilder<'static> {
    Cookie::build((SESSION_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
}

fn is_api(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

/// Render a denial the way the caller expects: JSON for the API,
/// a login redirect or error page for browser routes.
fn deny(path: &str, err: AppError) -> Response {
    if is_api(path) {
        return err.into_response();
    }
    match err {
        AppError::Unauthorized => Redirect::to(LOGIN_ROUTE).into_response(),
        other => PageError(other).into_response(),
    }
}

/// Look up the session and refresh its principal from the account record.
///
/// Role and email come from the stored account, so a demotion applies on
/// the next request. A session whose account is gone is destroyed.
async fn resolve_session(
    state: &AppState,
    headers: &HeaderMap,
) -> AppResult<Option<CurrentUser>> {
    let Some(session_id) = session_id_from(headers) else {
        return Ok(None);
    };
    let Some(principal) = state.sessions.get(&session_id).await? else {
        return Ok(None);
    };

    match state.user_service.find_by_id(principal.user_id).await? {
        Some(user) => Ok(Some(CurrentUser {
            session_id,
            principal: Principal::from(&user),
        })),
        None => {
            tracing::warn!(user_id = %principal.user_id, "Discarding session of a deleted account");
            state.sessions.destroy(&session_id).await?;
            Ok(None)
        }
    }
}

/// Session resolution plus access policy enforcement.
pub async fn access_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let current_user = match resolve_session(&state, request.headers()).await {
        Ok(user) => user,
        Err(err) => return deny(&path, err),
    };

    let decision = match (state.policy.required(&path), &current_user) {
        (Access::Public, _) => Ok(()),
        (_, None) => Err(AppError::Unauthorized),
        (Access::Admin, Some(user)) if !user.is_admin() => Err(AppError::Forbidden),
        _ => Ok(()),
    };

    if let Err(err) = decision {
        tracing::warn!(
            path = %path,
            user = current_user.as_ref().map(|u| u.email()).unwrap_or("anonymous"),
            "Access denied"
        );
        return deny(&path, err);
    }

    if let Some(user) = current_user {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths_need_no_session() {
        let policy = AccessPolicy::standard();
        for path in ["/", "/home", "/login", "/register", "/css/site.css", "/images/logo.png"] {
            assert_eq!(policy.required(path), Access::Public, "{}", path);
        }
    }

    #[test]
    fn admin_area_requires_admin() {
        let policy = AccessPolicy::standard();
        assert_eq!(policy.required("/admin/dashboard"), Access::Admin);
        assert_eq!(policy.required("/admin"), Access::Admin);
        assert_eq!(policy.required("/api/admin/properties/pending"), Access::Admin);
    }

    #[test]
    fn everything_else_requires_a_session() {
        let policy = AccessPolicy::standard();
        assert_eq!(policy.required("/dashboard"), Access::Authenticated);
        assert_eq!(policy.required("/properties/list"), Access::Authenticated);
        assert_eq!(policy.required("/api/properties"), Access::Authenticated);
        assert_eq!(policy.required("/loginx"), Access::Authenticated);
        assert_eq!(policy.required("/administrator"), Access::Authenticated);
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = AccessPolicy::new(
            vec![
                AccessRule::new("/admin/public/**", Access::Public),
                AccessRule::new("/admin/**", Access::Admin),
            ],
            Access::Authenticated,
        );
        assert_eq!(policy.required("/admin/public/logo.png"), Access::Public);
        assert_eq!(policy.required("/admin/users"), Access::Admin);
    }

    use axum::http::{header, HeaderValue};

    #[test]
    fn session_cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; ESTATE_SESSION=abc123; lang=en"),
        );
        assert_eq!(session_id_from(&headers).as_deref(), Some("abc123"));

        let empty = HeaderMap::new();
        assert_eq!(session_id_from(&empty), None);
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie("abc", 3600, true);
        assert_eq!(cookie.name(), "ESTATE_SESSION");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));

        let expired = expired_session_cookie(false);
        assert_eq!(expired.value(), "");
        assert_eq!(expired.max_age(), Some(Duration::ZERO));
        assert!(expired.to_string().contains("Max-Age=0"));
    }
}
