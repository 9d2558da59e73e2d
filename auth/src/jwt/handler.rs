use std::collections::HashSet;

use chrono::DateTime;
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
use super::errors::JwtError;

/// Issues and validates signed, time-bounded access tokens.
///
/// Uses HS256 (HMAC with SHA-256). The keys are derived once from the
/// process-wide secret and never change afterwards, so a single handler can be
/// shared by every concurrent request.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    validity: Duration,
}

impl JwtHandler {
    /// Minimum secret length for HS256.
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `validity` - How long issued tokens stay valid
    ///
    /// # Errors
    /// * `WeakSecret` - Secret shorter than 32 bytes
    /// * `InvalidValidity` - Validity window is not positive, or pushes the
    ///   expiry past the representable time range
    pub fn new(secret: &[u8], validity: Duration) -> Result<Self, JwtError> {
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(JwtError::WeakSecret {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        if validity <= Duration::zero() || Utc::now().checked_add_signed(validity).is_none() {
            return Err(JwtError::InvalidValidity);
        }

        let algorithm = Algorithm::HS256;

        // Expiry is checked against an explicit clock in `validate_at`.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["sub".to_string(), "exp".to_string()]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            validity,
        })
    }

    /// Validity window applied to issued tokens.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Issue a token for `subject`, valid from now.
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if issued at `issued_at`.
    pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        self.encode(&Claims::for_subject(subject, issued_at, self.validity)?)
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, its signature does not match, or it has expired
    pub fn validate(&self, token: &str) -> Result<String, JwtError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token against the clock value `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| JwtError::InvalidToken)?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(JwtError::InvalidToken);
        }

        Ok(token_data.claims.sub)
    }

    /// Check that `token` is valid and bound to exactly `subject`.
    pub fn is_valid_for(&self, token: &str, subject: &str) -> bool {
        self.validate(token).map_or(false, |sub| sub == subject)
    }
}
