//! Request-scoped authentication context types.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Coarse permission tag derived from a user's role (e.g. `ROLE_USER`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity attached to a request once its bearer token has been validated
/// and its subject resolved to an existing user.
///
/// Lives only for the duration of one request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationContext {
    subject: String,
    authorities: Vec<Authority>,
}

impl AuthenticationContext {
    /// Build a context for `subject`, translating its role into a single authority.
    pub fn new(subject: impl Into<String>, role: &str) -> Self {
        Self {
            subject: subject.into(),
            authorities: vec![Authority::new(role)],
        }
    }

    /// Authenticated subject (the user's email address).
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == authority)
    }
}
