//! Admin command - Bootstrap administrator accounts.

use std::sync::Arc;

use crate::cli::args::{AdminAction, AdminArgs};
use crate::config::{Config, ROLE_ADMIN};
use crate::domain::NewUser;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{UserManager, UserService};

/// Execute the admin command
pub async fn execute(args: AdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let users = UserManager::new(Arc::new(Persistence::new(db.get_connection())));

    match args.action {
        AdminAction::Create(create) => {
            let user = users
                .register(NewUser {
                    full_name: create.name,
                    email: create.email,
                    password: create.password,
                    confirm_password: None,
                    role: Some(ROLE_ADMIN.to_string()),
                })
                .await?;
            println!("Created administrator {} ({})", user.email, user.id);
        }
    }

    Ok(())
}
