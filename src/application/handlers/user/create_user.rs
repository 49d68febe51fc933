//! CreateUserHandler - Registers a user with zeroed progress.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub username: String,
    pub email: String,
}

pub struct CreateUserHandler {
    users: Arc<dyn UserRepository>,
}

impl CreateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: CreateUserCommand) -> Result<User, UserError> {
        let user = User::new(UserId::new(), cmd.username, cmd.email)?;
        self.users.create(&user).await?;
        info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;

    fn command(username: &str, email: &str) -> CreateUserCommand {
        CreateUserCommand {
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_user_at_level_one() {
        let store = Arc::new(InMemoryStore::new());
        let handler = CreateUserHandler::new(store.clone());

        let user = handler.handle(command("sam", "sam@example.com")).await.unwrap();
        assert_eq!(user.level, 1);
        assert!(store.find_by_id(&user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let handler = CreateUserHandler::new(Arc::new(InMemoryStore::new()));
        let err = handler.handle(command("sam", "not-an-email")).await.unwrap_err();
        assert!(matches!(err, UserError::InvalidInput { ref field, .. } if field == "email"));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let handler = CreateUserHandler::new(Arc::new(InMemoryStore::new()));
        handler.handle(command("sam", "sam@example.com")).await.unwrap();
        let err = handler.handle(command("sam", "other@example.com")).await.unwrap_err();
        assert_eq!(err, UserError::AlreadyExists("sam".to_string()));
    }
}
