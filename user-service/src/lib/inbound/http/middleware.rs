use auth::AuthenticationContext;
use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication gate, run once per request.
///
/// Attaches an [`AuthenticationContext`] when the request carries a valid
/// bearer token for an existing user. Never rejects: anonymous requests
/// continue unchanged and protected routes decide with
/// [`require_authentication`]. A context already present is left alone.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthenticationContext>().is_none() {
        let headers = req.headers();
        let context =
            resolve_authentication(&state.authenticator, state.user_service.as_ref(), headers)
                .await;

        if let Some(context) = context {
            req.extensions_mut().insert(context);
        }
    }

    next.run(req).await
}

/// Resolve the caller identity from the `Authorization` header.
///
/// Returns `None` for a missing or non-bearer header, any token failure, and
/// subjects that no longer resolve to a user.
pub async fn resolve_authentication(
    authenticator: &Authenticator,
    users: &dyn UserServicePort,
    headers: &HeaderMap,
) -> Option<AuthenticationContext> {
    let token = bearer_token(headers)?;

    let subject = match authenticator.validate_token(token) {
        Ok(subject) => subject,
        Err(_) => {
            tracing::debug!("Bearer token rejected");
            return None;
        }
    };

    let user = match users.get_user_by_email(&subject).await {
        Ok(user) => user,
        Err(UserError::NotFoundByEmail(_)) => {
            tracing::debug!("Bearer token subject has no account");
            return None;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Bearer token subject lookup failed");
            return None;
        }
    };

    if user.email.as_str() != subject
        || !authenticator.token_matches_subject(token, user.email.as_str())
    {
        tracing::debug!("Bearer token rejected");
        return None;
    }

    Some(AuthenticationContext::new(user.email.as_str(), &user.role))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Route layer for endpoints that need an authenticated caller.
pub async fn require_authentication(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<AuthenticationContext>().is_none() {
        return Err(ApiError::Unauthorized(
            "Authentication required".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
