//! Authenticated identity carried by a session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Role, User};
use crate::config::{ADMIN_LANDING_ROUTE, CUSTOMER_LANDING_ROUTE};

/// The signed-in account and its single role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Route a freshly authenticated user is sent to.
    pub fn landing_route(&self) -> &'static str {
        match self.role {
            Role::Admin => ADMIN_LANDING_ROUTE,
            Role::Customer => CUSTOMER_LANDING_ROUTE,
        }
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}
