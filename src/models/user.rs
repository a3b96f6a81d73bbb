use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::users;

/// A live user row as returned by the list and update operations.
///
/// Carries the password and token; only [`PublicUser`] is safe to hand out
/// on a per-user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub token: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password: model.password,
            token: model.token,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Reduced view of a user without the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub token: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            token: user.token,
        }
    }
}

/// Request body shared by create, update and delete.
///
/// Missing and `null` fields decode as empty strings, which the update merge
/// treats as "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub token: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserPayload {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: String::new(),
        }
    }

    /// Fields of this payload that would overwrite a stored record.
    #[must_use]
    pub fn changes(&self) -> UserChanges {
        UserChanges {
            password: non_empty(&self.password),
            token: non_empty(&self.token),
        }
    }
}

/// Partial update extracted from a [`UserPayload`]; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub password: Option<String>,
    pub token: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
