use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use chrono::Utc;
use secrecy::ExposeSecret;
use secrecy::Secret;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Page;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher configured with the service's work factor
    pub fn new(repository: Arc<UR>, password_hasher: auth::PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    /// Hash a password on the blocking pool; Argon2 is memory and CPU bound.
    async fn hash_password(&self, password: Secret<String>) -> Result<String, UserError> {
        let password_hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || password_hasher.hash(password.expose_secret()))
            .await
            .map_err(|e| PasswordError::HashingFailed(format!("Hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            role: command.role,
            age: command.age,
            address: command.address,
            phone_number: command.phone_number,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            role = %created_user.role,
            "User created"
        );

        Ok(created_user)
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError> {
        self.repository.list(page.offset(), page.limit()).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(first_name) = command.first_name {
            user.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            user.last_name = last_name;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(new_password).await?;
        }

        if let Some(role) = command.role {
            user.role = role;
        }

        if let Some(age) = command.age {
            user.age = age;
        }

        if let Some(address) = command.address {
            user.address = Some(address);
        }

        if let Some(phone_number) = command.phone_number {
            user.phone_number = Some(phone_number);
        }

        let updated_user = self.repository.update(user).await?;

        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        let deleted_user = self.repository.delete_by_email(email).await?;

        tracing::info!(user_id = %deleted_user.id, "User deleted");

        Ok(deleted_user)
    }
}

#[cfg(test)]
mod tests {
    use auth::Role;
    use mockall::mock;

    use super::*;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn list(&self, offset: u64, limit: u32) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete_by_email(&self, email: &EmailAddress) -> Result<User, UserError>;
        }
    }

    fn hasher() -> auth::PasswordHasher {
        auth::PasswordHasher::with_params(1024, 1, 1).unwrap()
    }

    fn email(value: &str) -> EmailAddress {
        EmailAddress::new(value.to_string()).unwrap()
    }

    fn stored_user(id: UserId, address: &str) -> User {
        User {
            id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email(address),
            password_hash: "$argon2id$old_hash".to_string(),
            role: Role::User,
            age: 36,
            address: None,
            phone_number: None,
            created_at: Utc::now(),
        }
    }

    fn create_command() -> CreateUserCommand {
        CreateUserCommand {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: email("a@b.com"),
            password: Secret::new("secret".to_string()),
            role: Role::User,
            age: 30,
            address: None,
            phone_number: Some("555-0100".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "a@b.com"
                    && user.password_hash.starts_with("$argon2id$")
                    && !user.password_hash.contains("secret")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), hasher());

        let user = service.create_user(create_command()).await.unwrap();
        assert_eq!(user.first_name, "A");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.phone_number.as_deref(), Some("555-0100"));
        assert!(hasher().verify("secret", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.create_user(create_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_by_email_success() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        let returned_user = stored_user(user_id, "ada@example.com");
        repository
            .expect_find_by_email()
            .withf(|e| e.as_str() == "ada@example.com")
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository), hasher());

        let user = service
            .get_user_by_email(&email("ada@example.com"))
            .await
            .unwrap();
        assert_eq!(user.id, user_id);
    }

    #[tokio::test]
    async fn test_get_user_by_email_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.get_user_by_email(&email("nobody@example.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::NotFoundByEmail(_)
        ));
    }

    #[tokio::test]
    async fn test_list_users_translates_page_to_offset() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_list()
            .withf(|offset, limit| *offset == 20 && *limit == 10)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = UserService::new(Arc::new(repository), hasher());

        let users = service.list_users(Page::new(3, 10).unwrap()).await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_update_user_partial() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        let returned_user = stored_user(user_id, "old@example.com");
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        repository
            .expect_update()
            .withf(|user| {
                user.email.as_str() == "new@example.com"
                    && user.role == Role::Admin
                    && user.first_name == "Ada"
                    && user.password_hash.starts_with("$argon2id$v=19$")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), hasher());

        let command = UpdateUserCommand {
            email: Some(email("new@example.com")),
            password: Some(Secret::new("newpassword".to_string())),
            role: Some(Role::Admin),
            ..Default::default()
        };

        let updated_user = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated_user.email.as_str(), "new@example.com");
        assert_eq!(updated_user.last_name, "Lovelace");
        assert!(hasher()
            .verify("newpassword", &updated_user.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository), hasher());

        let command = UpdateUserCommand {
            first_name: Some("New".to_string()),
            ..Default::default()
        };

        let result = service.update_user(&UserId::new(), command).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user_by_email_success() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        let removed_user = stored_user(user_id, "ada@example.com");
        repository
            .expect_delete_by_email()
            .withf(|e| e.as_str() == "ada@example.com")
            .times(1)
            .returning(move |_| Ok(removed_user.clone()));

        let service = UserService::new(Arc::new(repository), hasher());

        let deleted = service
            .delete_user_by_email(&email("ada@example.com"))
            .await
            .unwrap();
        assert_eq!(deleted.id, user_id);
    }

    #[tokio::test]
    async fn test_delete_user_by_email_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_delete_by_email()
            .times(1)
            .returning(|e| Err(UserError::NotFoundByEmail(e.to_string())));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service
            .delete_user_by_email(&email("nobody@example.com"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::NotFoundByEmail(_)
        ));
    }
}
