pub mod errors;
pub mod scrypt;

pub use errors::PasswordError;
pub use scrypt::PasswordHasher;
pub use scrypt::ScryptCost;
