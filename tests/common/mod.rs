//! In-memory collaborators for router tests.
//!
//! The fakes honour the same contracts as the Postgres and Redis backed
//! implementations, so the full router can be driven without containers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use chrono::Utc;
use uuid::Uuid;

use estate_portal::api::{create_router, AppState, HttpSettings};
use estate_portal::config::SESSION_COOKIE_NAME;
use estate_portal::domain::{
    ImageUpload, NewProperty, Owner, Password, Principal, Property, PropertyStatus, Role,
    SearchCriteria, User,
};
use estate_portal::errors::{AppError, AppResult};
use estate_portal::infra::{
    HealthCheck, ImageStore, PropertyRepository, Repositories, SessionStore, UserRepository,
};
use estate_portal::services::Services;

pub const PASSWORD: &str = "s3cret-pass";

// =============================================================================
// Repositories
// =============================================================================

/// Accounts table. Shares the listings table so deletes can enforce the
/// owner foreign key (ON DELETE RESTRICT).
#[derive(Default)]
pub struct FakeUsers {
    rows: Mutex<Vec<User>>,
    listings: Arc<Mutex<Vec<Property>>>,
}

impl FakeUsers {
    pub fn all(&self) -> Vec<User> {
        self.rows.lock().unwrap().clone()
    }

    fn owner(&self, id: Uuid) -> Option<Owner> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .map(|u| Owner {
                id: u.id,
                full_name: u.full_name.clone(),
                email: u.email.clone(),
            })
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(
        &self,
        full_name: String,
        email: String,
        password_hash: String,
        role: Role,
    ) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == email) {
            return Err(AppError::conflict("Email"));
        }
        let user = User {
            id: Uuid::new_v4(),
            full_name,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id == user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(user)
            }
            None => Err(AppError::not_found("User", user.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let owns_listings = self.listings.lock().unwrap().iter().any(|p| p.owner_id == id);
        if owns_listings {
            return Err(AppError::Integrity);
        }
        self.rows.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.all())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

pub struct FakeProperties {
    users: Arc<FakeUsers>,
    rows: Arc<Mutex<Vec<Property>>>,
}

impl FakeProperties {
    pub fn new(users: Arc<FakeUsers>) -> Self {
        Self {
            rows: users.listings.clone(),
            users,
        }
    }

    pub fn all(&self) -> Vec<Property> {
        self.rows.lock().unwrap().clone()
    }

    fn with_owner(&self, mut property: Property) -> Property {
        property.owner = self.users.owner(property.owner_id);
        property
    }

    fn select(&self, keep: impl Fn(&Property) -> bool) -> Vec<Property> {
        let rows: Vec<Property> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| keep(p))
            .cloned()
            .collect();
        rows.into_iter().map(|p| self.with_owner(p)).collect()
    }
}

#[async_trait]
impl PropertyRepository for FakeProperties {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Property>> {
        Ok(self.select(|p| p.id == id).into_iter().next())
    }

    async fn list(&self) -> AppResult<Vec<Property>> {
        Ok(self.select(|_| true))
    }

    async fn list_by_status(&self, status: PropertyStatus) -> AppResult<Vec<Property>> {
        Ok(self.select(|p| p.status == status))
    }

    async fn search(&self, criteria: SearchCriteria) -> AppResult<Vec<Property>> {
        Ok(self.select(|p| criteria.matches(p)))
    }

    async fn create(
        &self,
        owner_id: Uuid,
        listing: NewProperty,
        image_url: Option<String>,
    ) -> AppResult<Property> {
        let property = Property {
            id: Uuid::new_v4(),
            title: listing.title,
            description: listing.description,
            price: listing.price,
            property_type: listing.property_type,
            location: listing.location,
            image_url,
            status: listing.status.unwrap_or(PropertyStatus::Pending),
            created_at: Utc::now(),
            owner_id,
            owner: None,
        };
        self.rows.lock().unwrap().push(property.clone());
        Ok(self.with_owner(property))
    }

    async fn save(&self, property: Property) -> AppResult<Property> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == property.id) {
            Some(row) => {
                *row = property.clone();
                Ok(property)
            }
            None => Err(AppError::not_found("Property", property.id)),
        }
    }

    async fn update_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        Ok(match rows.iter_mut().find(|p| p.id == id) {
            Some(row) => {
                row.status = status;
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

// =============================================================================
// Sessions, images, health
// =============================================================================

#[derive(Default)]
pub struct FakeSessions {
    entries: Mutex<HashMap<String, Principal>>,
}

impl FakeSessions {
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for FakeSessions {
    async fn create(&self, principal: Principal) -> AppResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.entries.lock().unwrap().insert(id.clone(), principal);
        Ok(id)
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<Principal>> {
        Ok(self.entries.lock().unwrap().get(session_id).cloned())
    }

    async fn destroy(&self, session_id: &str) -> AppResult<()> {
        self.entries.lock().unwrap().remove(session_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeImages {
    pub uploads: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageStore for FakeImages {
    async fn store(&self, folder: &str, image: ImageUpload) -> AppResult<String> {
        let name = image.file_name.unwrap_or_else(|| "upload".to_string());
        let url = format!("https://images.test/{}/{}", folder, name);
        self.uploads.lock().unwrap().push(url.clone());
        Ok(url)
    }
}

pub struct StaticCheck {
    pub name: &'static str,
    pub healthy: bool,
}

#[async_trait]
impl HealthCheck for StaticCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn ping(&self) -> AppResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::internal("connection refused"))
        }
    }
}

// =============================================================================
// Harness
// =============================================================================

pub struct TestApp {
    pub router: Router,
    pub users: Arc<FakeUsers>,
    pub properties: Arc<FakeProperties>,
    pub sessions: Arc<FakeSessions>,
    pub images: Arc<FakeImages>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_health(Vec::new())
    }

    pub fn with_health(health_checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        let users = Arc::new(FakeUsers::default());
        let properties = Arc::new(FakeProperties::new(users.clone()));
        let sessions = Arc::new(FakeSessions::default());
        let images = Arc::new(FakeImages::default());

        let uow = Arc::new(Repositories {
            users: users.clone(),
            properties: properties.clone(),
        });
        let services = Services::from_parts(uow, images.clone());
        let settings = HttpSettings {
            cookie_secure: false,
            session_ttl_seconds: 3600,
            max_upload_bytes: 1024 * 1024,
        };
        let state = AppState::new(&services, sessions.clone(), health_checks, settings);

        Self {
            router: create_router(state),
            users,
            properties,
            sessions,
            images,
        }
    }

    /// Insert an account directly, bypassing registration.
    pub async fn seed_user(&self, email: &str, role: Role) -> User {
        let hash = Password::new(PASSWORD).unwrap().into_string();
        self.users
            .create("Test User".to_string(), email.to_string(), hash, role)
            .await
            .unwrap()
    }

    pub async fn seed_property(&self, owner: &User, title: &str, location: &str) -> Property {
        self.properties
            .create(
                owner.id,
                NewProperty {
                    title: title.to_string(),
                    description: "Bright and quiet".to_string(),
                    price: Some(100_000.0),
                    property_type: "Sale".to_string(),
                    location: location.to_string(),
                    status: None,
                },
                None,
            )
            .await
            .unwrap()
    }

    /// Open a session for `user` and return the matching `Cookie` header value.
    pub async fn session_for(&self, user: &User) -> String {
        let id = self
            .sessions
            .create(Principal {
                user_id: user.id,
                email: user.email.clone(),
                role: user.role,
            })
            .await
            .unwrap();
        format!("{}={}", SESSION_COOKIE_NAME, id)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::ServiceExt;

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn json(method: &str, uri: &str, body: serde_json::Value, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub fn set_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
