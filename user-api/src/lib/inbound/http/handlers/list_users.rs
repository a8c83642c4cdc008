use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::Page;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let Query(query) = query?;
    let page = Page::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(Page::DEFAULT_LIMIT),
    )?;

    tracing::debug!(
        requested_by = %caller.user_id,
        page = page.number(),
        limit = page.limit(),
        "Listing users"
    );

    state
        .user_service
        .list_users(page)
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    page: Option<u32>,
    limit: Option<u32>,
}
