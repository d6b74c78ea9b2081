use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
///
/// Identity fields are optional on the wire: a token that omits one still
/// verifies and yields `None` for it. `exp` is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `login` - User login
    /// * `email` - User email
    /// * `lifetime` - Time until the token expires
    /// * `now` - Current Unix timestamp
    pub fn for_user(
        user_id: impl ToString,
        login: impl ToString,
        email: impl ToString,
        lifetime: Duration,
        now: i64,
    ) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            login: Some(login.to_string()),
            email: Some(email.to_string()),
            exp: now + lifetime.num_seconds(),
        }
    }

    /// Check if the token is expired.
    ///
    /// A token is valid only while `current_timestamp < exp`, so it is
    /// already expired at the exact expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

/// Identity resolved from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.user_id,
            login: claims.login,
            email: claims.email,
        }
    }
}
