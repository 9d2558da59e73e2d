use auth::AuthenticationContext;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Remove an account. Tokens already issued for it stop authenticating.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticationContext>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    state.user_service.delete_user(&user_id).await?;

    tracing::info!(user_id = %user_id, deleted_by = %caller.subject(), "Account removed");

    Ok(ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
