//! User service - Account registration and administration.
//!
//! Emails are normalized and roles resolved here, before anything reaches
//! the repository.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{normalize_email, NewUser, Password, Role, User, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account with a hashed password and a resolved role
    async fn register(&self, input: NewUser) -> AppResult<User>;

    /// Overwrite name, email and role; re-hash only when a new password is given
    async fn update(&self, changes: UserUpdate) -> AppResult<User>;

    /// Delete an account; fails with `Integrity` while it still owns listings
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// All accounts
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Lookup by email, normalized before the query
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Lookup by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Number of accounts
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register(&self, input: NewUser) -> AppResult<User> {
        if !input.password_confirmed() {
            return Err(AppError::validation("Passwords do not match"));
        }

        let email = normalize_email(&input.email);
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let role = Role::parse(input.role.as_deref())?;
        let password_hash = Password::new(&input.password)?.into_string();

        let user = self
            .uow
            .users()
            .create(input.full_name.trim().to_string(), email, password_hash, role)
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "Account registered");
        Ok(user)
    }

    async fn update(&self, changes: UserUpdate) -> AppResult<User> {
        let mut user = self
            .uow
            .users()
            .find_by_id(changes.id)
            .await?
            .ok_or_else(|| AppError::not_found("User", changes.id))?;

        user.full_name = changes.full_name.trim().to_string();
        user.email = normalize_email(&changes.email);

        if let Some(raw_role) = changes.role.as_deref() {
            user.role = Role::parse(Some(raw_role))?;
        }

        if let Some(password) = changes.new_password() {
            user.password_hash = Password::new(password)?.into_string();
        }

        let saved = self.uow.users().save(user).await?;
        tracing::info!(user_id = %saved.id, "Account updated");
        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().delete(id).await?;
        tracing::info!(user_id = %id, "Account deleted");
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.uow.users().find_by_email(&normalize_email(email)).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.uow.users().find_by_id(id).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.uow.users().count().await
    }
}
