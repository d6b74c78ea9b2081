use std::fs;
use std::path::Path;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::JwtError;

/// Asymmetric RSA key pair used to sign and verify tokens.
///
/// The private key only signs, the public key only verifies. Loaded once at
/// startup and held in memory for the life of the process.
#[derive(Clone)]
pub struct KeyPair {
    pub(crate) encoding_key: EncodingKey,
    pub(crate) decoding_key: DecodingKey,
}

impl KeyPair {
    /// Build a key pair from PEM encoded keys.
    ///
    /// # Arguments
    /// * `private_pem` - RSA private key (PKCS#1 or PKCS#8 PEM)
    /// * `public_pem` - RSA public key (SPKI or PKCS#1 PEM)
    ///
    /// # Errors
    /// * `InvalidKey` - Either key cannot be parsed as RSA PEM
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| JwtError::InvalidKey(format!("private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| JwtError::InvalidKey(format!("public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
        })
    }

    /// Read and parse a key pair from PEM files.
    ///
    /// # Errors
    /// * `InvalidKey` - A file cannot be read or parsed
    pub fn from_files(
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> Result<Self, JwtError> {
        let private_pem = read_pem(private_path.as_ref())?;
        let public_pem = read_pem(public_path.as_ref())?;
        Self::from_pem(&private_pem, &public_pem)
    }
}

pub(crate) fn read_pem(path: &Path) -> Result<Vec<u8>, JwtError> {
    fs::read(path).map_err(|e| JwtError::InvalidKey(format!("{}: {}", path.display(), e)))
}
