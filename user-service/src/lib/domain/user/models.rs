use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered user. `password_hash` is the opaque encoded
/// scrypt hash and is never returned to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user as supplied by a caller, every attribute optional.
///
/// Registration and update requests arrive in this shape and are checked by
/// the field rules in [`crate::user::validation`] before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UserRecord {
    pub fn new(id: &str, login: &str, email: &str, name: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            login: Some(login.to_string()),
            email: Some(email.to_string()),
            name: Some(name.to_string()),
            password: None,
        }
    }
}

/// The stored state of a user, used as the "old" side of an update.
impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id.to_string()),
            login: Some(user.login.clone()),
            email: Some(user.email.clone()),
            name: user.name.clone(),
            password: None,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub access_token: String,
}
