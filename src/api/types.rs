use serde::{Deserialize, Serialize};

use crate::models::user::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersListResponse {
    #[serde(rename = "usersList")]
    pub users_list: Vec<User>,
}

/// Wraps a single user view under a `user` key.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse<T> {
    pub user: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileUrlResponse {
    #[serde(rename = "fileURL")]
    pub file_url: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
}
