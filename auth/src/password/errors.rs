use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// Secure randomness or the key derivation step was unavailable.
    #[error("Cryptographic operation failed: {0}")]
    CryptoFailure(String),

    /// Stored hash could not be decoded or is too short.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
