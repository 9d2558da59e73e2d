//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the shop services:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded access tokens (JWT, HS256)
//! - Authentication coordination
//! - The request-scoped authentication context
//!
//! Each service resolves token subjects against its own credential store and
//! attaches an [`AuthenticationContext`] to the request.
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
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24)).unwrap();
//! let token = handler.issue("alice@example.com").unwrap();
//! let subject = handler.validate(&token).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "alice@example.com").unwrap();
//! println!("Token: {}", result.access_token);
//!
//! // Validate token
//! let subject = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```

pub mod authenticator;
pub mod context;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use context::AuthenticationContext;
pub use context::Authority;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
