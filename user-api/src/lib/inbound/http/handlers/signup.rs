use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::create_user::UserRequestBody;
use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Registers a user and returns a token for the new identity.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<UserRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;

    let user = state
        .user_service
        .create_user(body.try_into_command()?)
        .await?;

    let token = state
        .authenticator
        .issue_token(user.id, user.role)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, role = %user.role, "User signed up");

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        TokenResponseData { token },
    ))
}
