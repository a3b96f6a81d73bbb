//! User record endpoints.
//!
//! Handlers only decode requests and shape responses; the record rules live
//! in [`UserService`](crate::services::UserService).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::{
    ApiError, AppState, MessageResponse, TokenResponse, UserResponse, UsersListResponse,
};
use crate::models::user::{PublicUser, User, UserPayload};
use crate::services::UserError;

/// Any body that does not decode into a [`UserPayload`] is a validation failure.
fn decode_payload(
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<UserPayload, UserError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| UserError::Validation(rejection.body_text()))
}

/// POST /user
/// Register a user and return its bearer token
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let payload = decode_payload(payload)?;
    let token = state.user_service().create(payload).await?;

    Ok(Json(TokenResponse { token }))
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UsersListResponse>, ApiError> {
    let users = state.user_service().list_all().await?;

    Ok(Json(UsersListResponse { users_list: users }))
}

/// GET /user/{username}
/// Password is never part of this response
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse<PublicUser>>, ApiError> {
    let user = state.user_service().get_by_username(&username).await?;

    Ok(Json(UserResponse { user }))
}

/// PUT /user
/// Partial update keyed by `username`; empty fields are left as stored
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<UserResponse<User>>, ApiError> {
    let payload = decode_payload(payload)?;
    let user = state.user_service().update_by_username(payload).await?;

    Ok(Json(UserResponse { user }))
}

/// DELETE /user
/// Only `username` is read from the body
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let payload = decode_payload(payload)?;
    state
        .user_service()
        .delete_by_username(&payload.username)
        .await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
