//! Estate Portal - property listings with customer and admin roles
//!
//! Customers register, sign in, submit listings with an optional image and
//! search the catalogue. Administrators manage accounts and moderate
//! listings (PENDING, APPROVED, REJECTED).
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Accounts, listings and moderation status
//! - **services**: Registration, login, listing and upload use cases
//! - **infra**: Postgres, Redis sessions and the image host
//! - **api**: Pages, JSON API, access policy and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Bootstrap an administrator
//! cargo run -- admin create --email admin@mail.com --password 'change-me-now'
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, Property, PropertyStatus, Role, User};
pub use errors::{AppError, AppResult};
