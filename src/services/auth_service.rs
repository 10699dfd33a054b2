//! Authentication service - Credential checks for the login form.
//!
//! DDD: Uses the domain Password value object for verification.
//! DDD: Uses Unit of Work for repository access.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{normalize_email, Password, Principal};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check email and password; a failure never says which one was wrong
    async fn login(&self, email: &str, password: &str) -> AppResult<Principal>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: &str, password: &str) -> AppResult<Principal> {
        let email = normalize_email(email);
        let user = self.uow.users().find_by_email(&email).await?;

        // Verify against a dummy hash for unknown emails so both paths cost
        // one Argon2 run.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.as_str()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, role = %user.role, "Login succeeded");
                Ok(Principal::from(&user))
            }
            _ => {
                tracing::warn!("Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::config::{ADMIN_LANDING_ROUTE, CUSTOMER_LANDING_ROUTE};
    use crate::domain::{Role, User};
    use crate::infra::{MockPropertyRepository, MockUserRepository, Repositories};

    fn service(repo: MockUserRepository) -> Authenticator<Repositories> {
        Authenticator::new(Arc::new(Repositories {
            users: Arc::new(repo),
            properties: Arc::new(MockPropertyRepository::new()),
        }))
    }

    fn account(role: Role, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            full_name: "Ann Admin".to_string(),
            email: "ann@mail.com".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn admin_login_lands_on_admin_dashboard() {
        let user = account(Role::Admin, "Admin-pass-1");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "ann@mail.com")
            .returning(move |_| Ok(Some(user.clone())));

        let principal = service(repo)
            .login(" Ann@Mail.com ", "Admin-pass-1")
            .await
            .unwrap();

        assert!(principal.is_admin());
        assert_eq!(principal.landing_route(), ADMIN_LANDING_ROUTE);
    }

    #[tokio::test]
    async fn customer_login_lands_on_dashboard() {
        let user = account(Role::Customer, "Customer-pass-1");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let principal = service(repo)
            .login("ann@mail.com", "Customer-pass-1")
            .await
            .unwrap();

        assert_eq!(principal.landing_route(), CUSTOMER_LANDING_ROUTE);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_identically() {
        let user = account(Role::Customer, "Customer-pass-1");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |email| {
                Ok((email == "ann@mail.com").then(|| user.clone()))
            });
        let auth = service(repo);

        let wrong_password = auth.login("ann@mail.com", "nope-nope-nope").await;
        let unknown_email = auth.login("who@mail.com", "Customer-pass-1").await;

        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AppError::InvalidCredentials)));
    }
}
