use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by an access token.
///
/// Only the subject and the validity interval are signed; the user's role is
/// resolved from the credential store on every request instead of being
/// trusted from the token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the user's email address)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject valid from `issued_at` for `validity`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token is bound to
    /// * `issued_at` - Issuance instant
    /// * `validity` - Length of the validity window
    ///
    /// # Errors
    /// * `InvalidValidity` - Expiry falls outside the representable time range
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at
            .checked_add_signed(validity)
            .ok_or(JwtError::InvalidValidity)?;

        Ok(Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is only valid strictly before its expiry instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Expiry instant as a UTC datetime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let now = Utc::now();
        let claims = Claims::for_subject("alice@example.com", now, Duration::hours(24)).unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_for_subject_expiry_out_of_range() {
        let result = Claims::for_subject(
            "alice@example.com",
            Utc::now(),
            Duration::hours(10_000_000_000),
        );

        assert_eq!(result, Err(JwtError::InvalidValidity));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_expires_at() {
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            iat: 0,
            exp: 1_700_000_000,
        };

        assert_eq!(claims.expires_at().map(|t| t.timestamp()), Some(1_700_000_000));
    }
}
