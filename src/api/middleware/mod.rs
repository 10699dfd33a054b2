//! API middleware.

mod auth;

pub use auth::{
    access_middleware, expired_session_cookie, session_cookie, session_id_from, Access,
    AccessPolicy, AccessRule, CurrentUser,
};
