use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::LoginResult;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRecord;
use crate::domain::user::validation::validate_password_change;
use crate::domain::user::validation::validate_user_register;
use crate::domain::user::validation::validate_user_update;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Key derivation is CPU bound and runs on the blocking pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();

        let hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password)).await??;

        Ok(hash)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, record: UserRecord) -> Result<User, UserError> {
        let errors = validate_user_register(&record);
        if !errors.is_empty() {
            return Err(UserError::Validation(errors));
        }

        let login = record.login.unwrap_or_default();
        if self.repository.exists(&login).await? {
            return Err(UserError::LoginAlreadyExists(login));
        }

        let password_hash = self
            .hash_password(record.password.as_deref().unwrap_or_default())
            .await?;

        let user = User {
            id: UserId::new(),
            login,
            email: record.email.unwrap_or_default(),
            name: record.name.filter(|name| !name.is_empty()),
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, login = %created_user.login, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(&self, id: &UserId, mut record: UserRecord) -> Result<User, UserError> {
        let mut user = self.get_user(id).await?;

        // Callers only ever update themselves
        record.id = Some(id.to_string());

        let errors = validate_user_update(&record, &UserRecord::from(&user));
        if !errors.is_empty() {
            return Err(UserError::Validation(errors));
        }

        if record.name.is_some() {
            user.name = record.name.filter(|name| !name.is_empty());
        }

        self.repository.update(user).await
    }

    async fn update_password(&self, id: &UserId, password: &str) -> Result<(), UserError> {
        let errors = validate_password_change(password);
        if !errors.is_empty() {
            return Err(UserError::Validation(errors));
        }

        let password_hash = self.hash_password(password).await?;
        self.repository.update_password(id, &password_hash).await?;
        tracing::info!(user_id = %id, "Password changed");

        Ok(())
    }

    async fn authenticate(&self, login: &str, password: &str) -> Result<LoginResult, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();

        let Some(user) = self.repository.find_by_login(login).await? else {
            let err =
                tokio::task::spawn_blocking(move || authenticator.reject_unknown_login(&password))
                    .await?;
            return Err(err.into());
        };

        let subject = user.clone();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(
                &password,
                &subject.password_hash,
                &subject.id.to_string(),
                &subject.login,
                &subject.email,
            )
        })
        .await??;

        Ok(LoginResult {
            user,
            access_token: result.access_token,
        })
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
