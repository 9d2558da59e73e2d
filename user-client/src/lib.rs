//! Typed client other shop services use to reach the user service.
//!
//! # Example
//!
//! ```no_run
//! use user_client::UserServiceClient;
//!
//! # async fn run() -> Result<(), user_client::UserClientError> {
//! let client = UserServiceClient::new("http://user-service:8081");
//! assert_eq!(client.ping().await?, "user-test");
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

const PING_PATH: &str = "/api/users/test";

#[derive(Debug, Error)]
pub enum UserClientError {
    #[error("User service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("User service answered with status {0}")]
    UnexpectedStatus(u16),
}

#[derive(Debug, Clone)]
pub struct UserServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl UserServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Reuse an existing connection pool.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call the user service's ping endpoint and return its text body.
    pub async fn ping(&self) -> Result<String, UserClientError> {
        let url = format!("{}{}", self.base_url, PING_PATH);

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "User service ping failed");
            UserClientError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "User service ping rejected");
            return Err(UserClientError::UnexpectedStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = UserServiceClient::new("http://localhost:8081/");
        assert_eq!(client.base_url(), "http://localhost:8081");
    }
}
