//! Authentication utilities library
//!
//! Provides the credential and token infrastructure for the user service:
//! - Password hashing (scrypt, salted, constant-time verification)
//! - Signed identity tokens (RS512 JWT) with expiry enforcement
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, KeyPair};
//!
//! let keys = KeyPair::from_pem(
//!     include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/keys/test_private.pem")),
//!     include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/keys/test_public.pem")),
//! )
//! .unwrap();
//! let handler = JwtHandler::new(keys, 24).unwrap();
//! let token = handler.issue("123", "wolfeidau", "mark@wolfe.id.au").unwrap();
//! let identity = handler.verify(&token).unwrap();
//! assert_eq!(identity.login.as_deref(), Some("wolfeidau"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::Identity;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::KeyPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::ScryptCost;
