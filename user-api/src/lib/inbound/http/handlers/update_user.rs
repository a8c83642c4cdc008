use auth::Role;
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::validate_age;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::errors::ValidationError;
use crate::user::ports::UserServicePort;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
    pub role: Option<String>,
    pub age: Option<u32>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, ValidationError> {
        let email = self.email.map(EmailAddress::new).transpose()?;
        let role = self
            .role
            .map(|role| role.parse::<Role>())
            .transpose()?;
        // Empty password means no change
        let password = self.password.filter(|p| !p.expose_secret().is_empty());

        Ok(UpdateUserCommand {
            first_name: self.first_name.filter(|s| !s.trim().is_empty()),
            last_name: self.last_name.filter(|s| !s.trim().is_empty()),
            email,
            password,
            role,
            age: self.age.map(validate_age).transpose()?,
            address: self.address,
            phone_number: self.phone_number,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let Json(request) = payload?;
    let command = request.try_into_command()?;

    tracing::debug!(user_id = %user_id, updated_by = %caller.user_id, "Updating user");

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
