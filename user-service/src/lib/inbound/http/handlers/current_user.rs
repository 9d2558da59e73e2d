use auth::AuthenticationContext;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;

/// Report the identity the authentication gate attached to this request.
///
/// Anonymous callers are allowed and receive `authenticated: false`.
pub async fn current_user(
    context: Option<Extension<AuthenticationContext>>,
) -> ApiSuccess<CurrentUserResponseData> {
    let data = match context {
        Some(Extension(context)) => CurrentUserResponseData {
            authenticated: true,
            email: Some(context.subject().to_string()),
            authorities: context
                .authorities()
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
        },
        None => CurrentUserResponseData {
            authenticated: false,
            email: None,
            authorities: Vec::new(),
        },
    };

    ApiSuccess::new(StatusCode::OK, data)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub authenticated: bool,
    pub email: Option<String>,
    pub authorities: Vec<String>,
}
