use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and JWT token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    // Hashed with the active cost on first use; reset when the hasher changes
    decoy_hash: OnceLock<Option<String>>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Instant after which the token is no longer accepted
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_validity` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is too short to sign tokens
    /// * `InvalidValidity` - Token lifetime is not positive
    pub fn new(jwt_secret: &[u8], token_validity: Duration) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, token_validity)?,
            decoy_hash: OnceLock::new(),
        })
    }

    /// Replace the password hasher (e.g. to tune the Argon2 cost).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_hash = OnceLock::new();
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate a token bound to `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the issued token is bound to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.generate_token(subject)?)
    }

    /// Spend one password verification for a login whose account does not exist.
    ///
    /// Unknown accounts then cost the same Argon2 work as wrong passwords, so
    /// response timing does not reveal which of the two failed.
    pub fn verify_without_account(&self, password: &str) {
        let decoy_hash = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());

        if let Some(hash) = decoy_hash {
            let _ = self.password_hasher.verify(password, hash);
        }
    }

    /// Generate a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, subject: &str) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_subject(subject, Utc::now(), self.jwt_handler.validity())?;
        let access_token = self.jwt_handler.encode(&claims)?;
        let expires_at = claims.expires_at().ok_or(JwtError::InvalidValidity)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.jwt_handler.validate(token)
    }

    /// Check that `token` is valid and bound to exactly `subject`.
    pub fn token_matches_subject(&self, token: &str, subject: &str) -> bool {
        self.jwt_handler.is_valid_for(token, subject)
    }
}
