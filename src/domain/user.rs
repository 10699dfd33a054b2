//! User domain entity, role model and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_CUSTOMER, ROLE_PREFIX};
use crate::errors::{AppError, AppResult};

/// Apply the storage prefix rule to a raw role value.
///
/// A value already starting with `ROLE_` (case-sensitive, on the raw input)
/// is returned as is. Otherwise the value is upper-cased and prefixed.
/// Absent or blank input yields the customer role.
pub fn normalize_role(raw: Option<&str>) -> String {
    match raw.filter(|r| !r.trim().is_empty()) {
        None => ROLE_CUSTOMER.to_string(),
        Some(role) if role.starts_with(ROLE_PREFIX) => role.to_string(),
        Some(role) => format!("{}{}", ROLE_PREFIX, role.to_uppercase()),
    }
}

/// Canonical email form: trimmed and lower-cased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Account roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    /// Parse external role input (form or JSON) using the prefix rule.
    ///
    /// Anything that does not normalize to a known role is rejected.
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        let normalized = normalize_role(raw);
        match normalized.as_str() {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_CUSTOMER => Ok(Role::Customer),
            _ => Err(AppError::validation(format!("Unknown role: {}", normalized))),
        }
    }

    /// Read a persisted role. Unknown values degrade to customer.
    pub fn from_storage(value: &str) -> Self {
        match normalize_role(Some(value)).as_str() {
            ROLE_ADMIN => Role::Admin,
            _ => Role::Customer,
        }
    }

    /// Prefixed form written to the database.
    pub fn as_storage(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Customer => ROLE_CUSTOMER,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_storage())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Registration input after boundary validation
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// Repeated password from the form; `None` when the client sent none.
    pub confirm_password: Option<String>,
    pub role: Option<String>,
}

impl NewUser {
    /// A supplied confirmation must equal the password.
    pub fn password_confirmed(&self) -> bool {
        self.confirm_password
            .as_deref()
            .map_or(true, |confirm| confirm == self.password)
    }
}

/// Admin edit of an existing account.
///
/// An empty or absent password keeps the stored hash.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    /// The replacement password, if one was actually supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Display name
    #[schema(example = "John Doe")]
    pub full_name: String,
    /// Email address
    #[schema(example = "john@mail.com")]
    pub email: String,
    /// Role in storage form
    #[schema(example = "ROLE_CUSTOMER")]
    pub role: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprefixed_roles_are_upper_cased_and_prefixed() {
        assert_eq!(normalize_role(Some("admin")), "ROLE_ADMIN");
        assert_eq!(normalize_role(Some("Customer")), "ROLE_CUSTOMER");
        assert_eq!(normalize_role(Some("agent")), "ROLE_AGENT");
    }

    #[test]
    fn prefixed_roles_are_left_unchanged() {
        assert_eq!(normalize_role(Some("ROLE_ADMIN")), "ROLE_ADMIN");
        assert_eq!(normalize_role(Some("ROLE_something")), "ROLE_something");
    }

    #[test]
    fn prefix_check_is_case_sensitive() {
        assert_eq!(normalize_role(Some("role_admin")), "ROLE_ROLE_ADMIN");
    }

    #[test]
    fn prefix_check_uses_the_raw_value() {
        assert_eq!(normalize_role(Some(" ROLE_ADMIN")), "ROLE_ ROLE_ADMIN");
        assert!(Role::parse(Some(" ROLE_ADMIN")).is_err());
    }

    #[test]
    fn absent_role_defaults_to_customer() {
        assert_eq!(normalize_role(None), ROLE_CUSTOMER);
        assert_eq!(normalize_role(Some("  ")), ROLE_CUSTOMER);
    }

    #[test]
    fn email_is_trimmed_and_lower_cased() {
        assert_eq!(normalize_email("  Test@Email.com  "), "test@email.com");
    }

    #[test]
    fn role_parse_accepts_known_roles_only() {
        assert_eq!(Role::parse(Some("admin")).unwrap(), Role::Admin);
        assert_eq!(Role::parse(Some("ROLE_CUSTOMER")).unwrap(), Role::Customer);
        assert_eq!(Role::parse(None).unwrap(), Role::Customer);
        assert!(matches!(
            Role::parse(Some("manager")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn role_storage_round_trip() {
        assert_eq!(Role::from_storage(Role::Admin.as_storage()), Role::Admin);
        assert_eq!(Role::from_storage("customer"), Role::Customer);
        assert_eq!(Role::from_storage("garbage"), Role::Customer);
    }

    #[test]
    fn empty_password_keeps_existing_hash() {
        let update = UserUpdate {
            id: Uuid::new_v4(),
            full_name: "Jane".into(),
            email: "jane@mail.com".into(),
            role: None,
            password: Some(String::new()),
        };
        assert!(update.new_password().is_none());
    }
}
