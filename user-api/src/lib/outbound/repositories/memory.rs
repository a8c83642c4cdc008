use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user directory.
///
/// Users are kept in insertion order; listings walk it backwards so the
/// newest user comes first, matching the Postgres ordering. Contents are lost
/// on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == *email).cloned())
    }

    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);

        Ok(users
            .iter()
            .rev()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|existing| existing.id != user.id && existing.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let slot = users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;

        *slot = user.clone();
        Ok(user)
    }

    async fn delete_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        let position = users
            .iter()
            .position(|user| user.email == *email)
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))?;

        Ok(users.remove(position))
    }
}
