use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Identity;
use super::errors::JwtError;
use super::keys::KeyPair;

/// Signing algorithm for every token (RSA PKCS#1 v1.5 with SHA-512).
pub const ALGORITHM: Algorithm = Algorithm::RS512;

/// Default token lifetime.
pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// JWT token handler for issuing and verifying identity tokens.
///
/// Tokens are self-contained: verification needs only the public key and
/// the token. There is no server side revocation, so a token stays valid
/// until its embedded expiry even if the account is deleted or its
/// password changes.
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl JwtHandler {
    /// Create a handler that can issue and verify tokens.
    ///
    /// # Arguments
    /// * `keys` - RSA key pair
    /// * `expiration_hours` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `InvalidLifetime` - Lifetime is not positive or does not fit a `Duration`
    pub fn new(keys: KeyPair, expiration_hours: i64) -> Result<Self, JwtError> {
        let lifetime = Some(expiration_hours)
            .filter(|hours| *hours > 0)
            .and_then(Duration::try_hours)
            .ok_or(JwtError::InvalidLifetime(expiration_hours))?;

        Ok(Self {
            encoding_key: Some(keys.encoding_key),
            decoding_key: keys.decoding_key,
            lifetime,
        })
    }

    /// Create a verify-only handler from a public key.
    ///
    /// # Errors
    /// * `InvalidKey` - Public key cannot be parsed as RSA PEM
    pub fn verifier(public_pem: &[u8]) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| JwtError::InvalidKey(format!("public key: {}", e)))?;

        Ok(Self {
            encoding_key: None,
            decoding_key,
            lifetime: Duration::hours(DEFAULT_EXPIRATION_HOURS),
        })
    }

    /// Issue a signed token for a user, expiring one lifetime from now.
    ///
    /// # Errors
    /// * `SigningFailure` - No private key or signing failed
    pub fn issue(&self, subject_id: &str, login: &str, email: &str) -> Result<String, JwtError> {
        self.issue_at(subject_id, login, email, Utc::now().timestamp())
    }

    /// Issue a signed token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject_id: &str,
        login: &str,
        email: &str,
        now: i64,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_user(subject_id, login, email, self.lifetime, now);
        self.encode(&claims)
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `SigningFailure` - No private key or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let encoding_key = self.encoding_key.as_ref().ok_or_else(|| {
            JwtError::SigningFailure("handler is verify-only (no private key)".to_string())
        })?;

        encode(&Header::new(ALGORITHM), claims, encoding_key)
            .map_err(|e| JwtError::SigningFailure(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `MalformedToken` - Token cannot be parsed
    /// * `InvalidSignature` - Signature does not match the public key
    /// * `TokenExpired` - Expiry is not in the future
    pub fn verify(&self, token: &str) -> Result<Identity, JwtError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Identity, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims.into())
    }

    /// Check the signature and parse the claims without checking expiry.
    fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked by `Claims::is_expired` with no leeway
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}
