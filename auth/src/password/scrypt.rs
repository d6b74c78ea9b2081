use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use scrypt::Params;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Length of the random salt prefixed to every encoded hash.
pub const SALT_LENGTH: usize = 16;

/// Length of the scrypt derived key.
pub const KEY_LENGTH: usize = 32;

/// scrypt cost parameters.
///
/// Hashes are only verifiable with the cost they were created with, so a
/// hasher is bound to one cost for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptCost {
    /// log2 of the CPU/memory work factor N
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelism
    pub p: u32,
}

impl ScryptCost {
    pub const fn new(log_n: u8, r: u32, p: u32) -> Self {
        Self { log_n, r, p }
    }

    /// The work factor N (`2^log_n`).
    pub fn work_factor(&self) -> u64 {
        1u64 << self.log_n
    }

    fn params(&self) -> Result<Params, PasswordError> {
        Params::new(self.log_n, self.r, self.p, KEY_LENGTH)
            .map_err(|e| PasswordError::CryptoFailure(format!("Invalid scrypt cost: {}", e)))
    }
}

impl Default for ScryptCost {
    /// N = 16384, r = 8, p = 1
    fn default() -> Self {
        Self::new(14, 8, 1)
    }
}

/// Password hashing implementation.
///
/// Produces `base64(salt || scrypt(password, salt))` with a fresh 16 byte
/// salt per call. Derivation is deliberately expensive; async callers should
/// run it on a blocking worker.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: ScryptCost,
}

impl PasswordHasher {
    /// Create a password hasher with the default cost (N=16384, r=8, p=1).
    pub fn new() -> Self {
        Self {
            cost: ScryptCost::default(),
        }
    }

    /// Create a password hasher bound to a specific cost.
    ///
    /// # Errors
    /// * `CryptoFailure` - Cost parameters are rejected by scrypt
    pub fn with_cost(cost: ScryptCost) -> Result<Self, PasswordError> {
        cost.params()?;
        Ok(Self { cost })
    }

    pub fn cost(&self) -> ScryptCost {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Base64 encoding of the salt followed by the derived key
    ///
    /// # Errors
    /// * `CryptoFailure` - Random source or key derivation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::CryptoFailure(format!("Salt generation failed: {}", e)))?;

        let derived_key = self.derive(password, &salt)?;

        let mut encoded = Vec::with_capacity(SALT_LENGTH + KEY_LENGTH);
        encoded.extend_from_slice(&salt);
        encoded.extend_from_slice(&derived_key);

        Ok(STANDARD.encode(encoded))
    }

    /// Verify a password against a stored hash.
    ///
    /// The derived keys are compared in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored hash produced by [`PasswordHasher::hash`]
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Hash is not base64 or shorter than salt plus key
    /// * `CryptoFailure` - Key derivation failed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let decoded = STANDARD
            .decode(hash)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        if decoded.len() < SALT_LENGTH + KEY_LENGTH {
            return Err(PasswordError::MalformedHash(format!(
                "expected at least {} bytes, got {}",
                SALT_LENGTH + KEY_LENGTH,
                decoded.len()
            )));
        }

        let (salt, stored_key) = decoded.split_at(SALT_LENGTH);
        let derived_key = self.derive(password, salt)?;

        Ok(derived_key.as_slice().ct_eq(stored_key).into())
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<[u8; KEY_LENGTH], PasswordError> {
        let params = self.cost.params()?;
        let mut derived_key = [0u8; KEY_LENGTH];

        scrypt::scrypt(password.as_bytes(), salt, &params, &mut derived_key)
            .map_err(|e| PasswordError::CryptoFailure(format!("Key derivation failed: {}", e)))?;

        Ok(derived_key)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_PASSWORD: &str = "Somewh3r3 there is a cow!";
    const KNOWN_HASH: &str = "LkSquwzxdgzSTqqc7Rku5NF8/uR7TBFO1IRF1Yj2c0sM4HEVGgp0bJadWtRAaINP";

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_layout() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("my_secure_password").unwrap();

        let decoded = STANDARD.decode(&hash).unwrap();
        assert_eq!(decoded.len(), SALT_LENGTH + KEY_LENGTH);
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same password").unwrap();
        let second = hasher.hash("same password").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same password", &first).unwrap());
        assert!(hasher.verify("same password", &second).unwrap());
    }

    #[test]
    fn test_verify_known_hash() {
        let hasher = PasswordHasher::new();

        assert!(hasher.verify(KNOWN_PASSWORD, KNOWN_HASH).unwrap());
        assert!(!hasher.verify("Somewh3r3 there is a dog!", KNOWN_HASH).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash!");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_verify_short_hash() {
        let hasher = PasswordHasher::new();
        let short = STANDARD.encode([0u8; SALT_LENGTH + KEY_LENGTH - 1]);

        let result = hasher.verify("password", &short);
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_cost_mismatch_does_not_verify() {
        let cheap = PasswordHasher::with_cost(ScryptCost::new(10, 8, 1)).unwrap();
        let hash = cheap.hash("password").unwrap();

        assert!(cheap.verify("password", &hash).unwrap());
        assert!(!PasswordHasher::new().verify("password", &hash).unwrap());
    }

    #[test]
    fn test_default_cost() {
        let cost = PasswordHasher::new().cost();
        assert_eq!(cost.work_factor(), 16384);
        assert_eq!(cost.r, 8);
        assert_eq!(cost.p, 1);
    }

    #[test]
    fn test_invalid_cost() {
        let result = PasswordHasher::with_cost(ScryptCost::new(14, 0, 1));
        assert!(matches!(result, Err(PasswordError::CryptoFailure(_))));
    }
}
