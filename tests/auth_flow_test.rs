//! Session login, registration and access-control tests driven through the
//! full router.

mod common;

use axum::http::StatusCode;
use common::*;
use estate_portal::domain::Role;
use estate_portal::infra::UserRepository;

#[tokio::test]
async fn public_pages_need_no_session() {
    let app = TestApp::new();

    for uri in ["/", "/home", "/login", "/register"] {
        let response = app.send(get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }
}

#[tokio::test]
async fn anonymous_page_request_redirects_to_login() {
    let app = TestApp::new();

    let response = app.send(get("/dashboard", None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn anonymous_api_request_gets_json_401() {
    let app = TestApp::new();

    let response = app.send(get("/api/properties", None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn unknown_session_cookie_counts_as_anonymous() {
    let app = TestApp::new();

    let response = app
        .send(get("/dashboard", Some("ESTATE_SESSION=forged")))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn admin_login_lands_on_admin_dashboard() {
    let app = TestApp::new();
    app.seed_user("admin@mail.com", Role::Admin).await;

    let body = format!("email=%20ADMIN%40mail.com&password={}", PASSWORD);
    let response = app.send(form("/login", &body, None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/dashboard");

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("ESTATE_SESSION="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Secure"));
    assert_eq!(app.sessions.len(), 1);
}

#[tokio::test]
async fn customer_login_lands_on_dashboard_and_session_works() {
    let app = TestApp::new();
    app.seed_user("jane@mail.com", Role::Customer).await;

    let body = format!("email=jane%40mail.com&password={}", PASSWORD);
    let response = app.send(form("/login", &body, None)).await;
    assert_eq!(location(&response), "/dashboard");

    let cookie = set_cookie(&response);
    let pair = cookie.split(';').next().unwrap().to_string();

    let response = app.send(get("/dashboard", Some(&pair))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("jane@mail.com"));
}

#[tokio::test]
async fn failed_login_redirects_with_error_flag() {
    let app = TestApp::new();
    app.seed_user("jane@mail.com", Role::Customer).await;

    for body in [
        "email=jane%40mail.com&password=wrong-password",
        "email=nobody%40mail.com&password=wrong-password",
    ] {
        let response = app.send(form("/login", body, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login?error=true");
        assert!(set_cookie(&response).is_empty());
    }
    assert_eq!(app.sessions.len(), 0);
}

#[tokio::test]
async fn signed_in_user_visiting_login_is_sent_home() {
    let app = TestApp::new();
    let user = app.seed_user("jane@mail.com", Role::Customer).await;
    let cookie = app.session_for(&user).await;

    let response = app.send(get("/login", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn logout_destroys_session_and_expires_cookie() {
    let app = TestApp::new();
    let user = app.seed_user("jane@mail.com", Role::Customer).await;
    let cookie = app.session_for(&user).await;

    let response = app.send(get("/logout", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?logout");
    assert!(set_cookie(&response).contains("Max-Age=0"));
    assert_eq!(app.sessions.len(), 0);

    let response = app.send(get("/dashboard", Some(&cookie))).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn registration_normalizes_email_and_defaults_to_customer() {
    let app = TestApp::new();

    let response = app
        .send(form(
            "/register",
            "fullName=%20Jane%20Doe%20&email=%20Jane%40Mail.com%20&password=long-enough&confirmPassword=long-enough",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let users = app.users.all();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "jane@mail.com");
    assert_eq!(users[0].full_name, "Jane Doe");
    assert_eq!(users[0].role, Role::Customer);
    assert_ne!(users[0].password_hash, "long-enough");
}

#[tokio::test]
async fn duplicate_registration_rerenders_form_with_conflict() {
    let app = TestApp::new();
    app.seed_user("jane@mail.com", Role::Customer).await;

    let response = app
        .send(form(
            "/register",
            "fullName=Jane&email=JANE%40mail.com&password=long-enough",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_text(response).await.contains("already exists"));
    assert_eq!(app.users.all().len(), 1);
}

#[tokio::test]
async fn mismatched_confirmation_is_rejected() {
    let app = TestApp::new();

    let response = app
        .send(form(
            "/register",
            "fullName=Jane&email=jane%40mail.com&password=long-enough&confirmPassword=different",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Passwords do not match"));
    assert!(app.users.all().is_empty());
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = TestApp::new();

    let response = app
        .send(form(
            "/register",
            "fullName=Jane&email=jane%40mail.com&password=short",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.users.all().is_empty());
}

#[tokio::test]
async fn customer_is_forbidden_from_admin_area() {
    let app = TestApp::new();
    let user = app.seed_user("jane@mail.com", Role::Customer).await;
    let cookie = app.session_for(&user).await;

    let page = app.send(get("/admin/dashboard", Some(&cookie))).await;
    assert_eq!(page.status(), StatusCode::FORBIDDEN);
    assert!(body_text(page).await.contains("<html"));

    let api = app
        .send(get("/api/admin/properties/pending", Some(&cookie)))
        .await;
    assert_eq!(api.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(api).await["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admin_dashboard_shows_counts() {
    let app = TestApp::new();
    let admin = app.seed_user("admin@mail.com", Role::Admin).await;
    let customer = app.seed_user("jane@mail.com", Role::Customer).await;
    app.seed_property(&customer, "Villa", "Galle").await;
    let cookie = app.session_for(&admin).await;

    let response = app.send(get("/admin/dashboard", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<strong>2</strong> users"));
    assert!(html.contains("<strong>1</strong> properties"));
}

#[tokio::test]
async fn demoted_admin_loses_admin_area_on_next_request() {
    let app = TestApp::new();
    let admin = app.seed_user("admin@mail.com", Role::Admin).await;
    let cookie = app.session_for(&admin).await;

    let response = app.send(get("/admin/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut demoted = admin.clone();
    demoted.role = Role::Customer;
    app.users.save(demoted).await.unwrap();

    let response = app.send(get("/admin/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn session_of_deleted_account_is_discarded() {
    let app = TestApp::new();
    let user = app.seed_user("jane@mail.com", Role::Customer).await;
    let cookie = app.session_for(&user).await;

    app.users.delete(user.id).await.unwrap();

    let response = app.send(get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(app.sessions.len(), 0);
}
