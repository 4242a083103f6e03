use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns password hashing; the repository is the injected credential
/// store.
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
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFound(username.to_string()))
    }

    async fn authenticate_user(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<User, UserError> {
        // Unknown user and wrong password collapse into the same error
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.password_hasher.verify(password, &user.password_hash) {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
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

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self
                .password_hasher
                .hash(&new_password)
                .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;
        }

        self.repository.update(user).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
        }
    }

    fn test_user(username: &str, password_hash: String) -> User {
        User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            password_hash,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "testuser@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "password123"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("testuser@example.com".to_string()).unwrap(),
            password: "password123".to_string(),
        };

        let user = service.create_user(command).await.unwrap();
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("other@example.com".to_string()).unwrap(),
            password: "password456".to_string(),
        };

        let result = service.create_user(command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_user_success() {
        let hasher = auth::PasswordHasher::new();
        let password_hash = hasher.hash("secret123").unwrap();
        let stored = test_user("alice", password_hash);

        let mut repository = MockTestUserRepository::new();
        let returned = stored.clone();
        repository
            .expect_find_by_username()
            .withf(|u| u.as_str() == "alice")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("alice".to_string()).unwrap();
        let user = service
            .authenticate_user(&username, "secret123")
            .await
            .unwrap();
        assert_eq!(user.id, stored.id);
    }

    #[tokio::test]
    async fn test_authenticate_user_wrong_password() {
        let hasher = auth::PasswordHasher::new();
        let password_hash = hasher.hash("secret123").unwrap();
        let stored = test_user("alice", password_hash);

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("alice".to_string()).unwrap();
        let result = service.authenticate_user(&username, "wrong").await;
        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_user_unknown_username_is_same_failure() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        // Same error kind as a wrong password, so callers cannot tell
        // which usernames exist
        let username = Username::new("nobody".to_string()).unwrap();
        let result = service.authenticate_user(&username, "x").await;
        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_login_token_round_trip() {
        // Register bob, authenticate, issue a 30-minute token, verify
        // it resolves back to bob, then check an expired token fails
        let hasher = auth::PasswordHasher::new();
        let password_hash = hasher.hash("secret123").unwrap();
        let stored = test_user("bob", password_hash);
        let bob_id = stored.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("bob".to_string()).unwrap();
        let user = service
            .authenticate_user(&username, "secret123")
            .await
            .unwrap();

        let handler = auth::JwtHandler::new(b"test-secret-key-at-least-32-bytes!");
        let token = handler
            .issue_with_ttl(&user.id.to_string(), chrono::Duration::minutes(30))
            .unwrap();

        let claims = handler.verify(&token).unwrap();
        assert_eq!(claims.sub, bob_id.to_string());

        // Same subject, but issued 31 minutes ago with a 30-minute ttl
        let now = Utc::now().timestamp();
        let stale = handler
            .encode(&auth::Claims::with_timestamps(
                bob_id.to_string(),
                now - 31 * 60,
                now - 60,
            ))
            .unwrap();
        assert!(matches!(
            handler.verify(&stale),
            Err(auth::JwtError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_rehashes_password() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let existing = User {
            id: user_id,
            username: Username::new("olduser".to_string()).unwrap(),
            email: EmailAddress::new("old@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$old_hash".to_string(),
            created_at: Utc::now(),
        };

        let returned = existing.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_update()
            .withf(|user| {
                user.username.as_str() == "newuser"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "$argon2id$old_hash"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: Some(Username::new("newuser".to_string()).unwrap()),
            email: None,
            password: Some("newpassword".to_string()),
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated.username.as_str(), "newuser");
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: None,
            email: None,
            password: Some("newpassword".to_string()),
        };

        let result = service.update_user(&UserId::new(), command).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
