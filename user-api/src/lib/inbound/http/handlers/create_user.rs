use auth::Role;
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
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::validate_age;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::ValidationError;

/// Creates a user record without issuing a token.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = payload?;

    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body describing a new user (raw JSON).
///
/// Every field is optional at the JSON level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequestBody {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<Secret<String>>,
    role: Option<String>,
    age: Option<u32>,
    address: Option<String>,
    phone_number: Option<String>,
}

impl UserRequestBody {
    pub(crate) fn try_into_command(self) -> Result<CreateUserCommand, ValidationError> {
        let first_name = required_text(self.first_name, "firstName")?;
        let last_name = required_text(self.last_name, "lastName")?;
        let email = EmailAddress::new(required_text(self.email, "email")?)?;
        let password = self
            .password
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or(ValidationError::MissingField("password"))?;
        let role: Role = required_text(self.role, "role")?.parse()?;
        let age = validate_age(self.age.ok_or(ValidationError::MissingField("age"))?)?;

        Ok(CreateUserCommand {
            first_name,
            last_name,
            email,
            password,
            role,
            age,
            address: self.address,
            phone_number: self.phone_number,
        })
    }
}
