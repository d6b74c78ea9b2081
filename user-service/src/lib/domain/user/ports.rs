use async_trait::async_trait;

use crate::domain::user::models::LoginResult;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRecord;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `record` - Caller supplied attributes; must carry login, email and
    ///   password and must not carry an identifier
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `Validation` - One or more field rules failed
    /// * `LoginAlreadyExists` - Login is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register_user(&self, record: UserRecord) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Update the mutable attributes of an existing user.
    ///
    /// The record is checked against the stored user: identifier, login and
    /// email may be repeated but not changed, and a password must not be
    /// supplied.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Validation` - One or more field rules failed
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, record: UserRecord) -> Result<User, UserError>;

    /// Replace a user's password.
    ///
    /// # Errors
    /// * `Validation` - Password length out of bounds
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password(&self, id: &UserId, password: &str) -> Result<(), UserError>;

    /// Check credentials and issue an access token.
    ///
    /// An unknown login still costs one key derivation, so it cannot be told
    /// apart from a wrong password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown login or wrong password
    /// * `Password` - Stored hash is malformed
    /// * `Token` - Token signing failed
    async fn authenticate(&self, login: &str, password: &str) -> Result<LoginResult, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `LoginAlreadyExists` - Login is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by login, including its password hash.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, UserError>;

    /// Whether a user with this login exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists(&self, login: &str) -> Result<bool, UserError>;

    /// Store the profile attributes of an existing user.
    ///
    /// The password hash is left untouched.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Replace the stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
