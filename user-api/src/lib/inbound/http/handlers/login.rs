use std::sync::Arc;

use auth::AuthenticationError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;

use super::required_text;
use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::errors::ValidationError;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;

    let email = EmailAddress::new(required_text(body.email, "email")?)?;
    let password = body
        .password
        .ok_or(ValidationError::MissingField("password"))?;

    // Unknown email and wrong password produce the same response and cost
    let user = match state.user_service.get_user_by_email(&email).await {
        Ok(user) => Some(user),
        Err(UserError::NotFoundByEmail(_)) => None,
        Err(e) => return Err(e.into()),
    };

    let user_id = user.as_ref().map(|user| user.id);
    let authenticator = Arc::clone(&state.authenticator);

    let result = tokio::task::spawn_blocking(move || match user {
        Some(user) => authenticator.authenticate(
            password.expose_secret(),
            &user.password_hash,
            user.id,
            user.role,
        ),
        None => Err(authenticator.reject_unknown_user(password.expose_secret())),
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Login task failed: {}", e)))?;

    let result = result.map_err(|e| match e {
        AuthenticationError::InvalidCredentials => {
            tracing::debug!(known_user = user_id.is_some(), "Login rejected");
            ApiError::BadRequest(ApiError::INVALID_CREDENTIALS.to_string())
        }
        AuthenticationError::PasswordError(err) => {
            ApiError::InternalServerError(format!("Password verification failed: {}", err))
        }
        AuthenticationError::JwtError(err) => {
            ApiError::InternalServerError(format!("Token generation failed: {}", err))
        }
    })?;

    if let Some(user_id) = user_id {
        tracing::info!(user_id = %user_id, "User logged in");
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            token: result.access_token,
        },
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequestBody {
    email: Option<String>,
    password: Option<Secret<String>>,
}
