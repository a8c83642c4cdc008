use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::required_text;
use super::ApiError;
use super::ApiMessageData;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Deletes the user registered under the `email` query parameter.
pub async fn delete_user(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    query: Result<Query<DeleteUserQuery>, QueryRejection>,
) -> Result<ApiSuccess<ApiMessageData>, ApiError> {
    let Query(query) = query?;
    let email = required_text(query.email, "email")
        .and_then(EmailAddress::new)
        .map_err(|_| ApiError::BadRequest("Email is required".to_string()))?;

    let deleted = state.user_service.delete_user_by_email(&email).await?;

    tracing::info!(
        user_id = %deleted.id,
        deleted_by = %caller.user_id,
        "User removed via API"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ApiMessageData {
            message: "User deleted successfully".to_string(),
        },
    ))
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    email: Option<String>,
}
