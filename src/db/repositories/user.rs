use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{prelude::*, users};
use crate::models::user::UserChanges;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new row. No uniqueness check is made on `username`.
    pub async fn insert(
        &self,
        username: &str,
        password: &str,
        token: Option<String>,
    ) -> Result<users::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = users::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password.to_string()),
            token: Set(token),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;

        Ok(model)
    }

    /// First live row with this username, lowest id wins
    pub async fn find_first_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::DeletedAt.is_null())
            .order_by_asc(users::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<users::Model>> {
        let users = Users::find()
            .filter(users::Column::DeletedAt.is_null())
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(users)
    }

    /// Soft-delete by primary key. Returns false if the row was already gone.
    pub async fn soft_delete(&self, id: i32) -> Result<bool> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = Users::update_many()
            .col_expr(
                users::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(Some(now)),
            )
            .filter(users::Column::Id.eq(id))
            .filter(users::Column::DeletedAt.is_null())
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected > 0)
    }

    /// Merge `changes` onto `user` and persist. `updated_at` is always refreshed.
    pub async fn apply_changes(
        &self,
        user: users::Model,
        changes: UserChanges,
    ) -> Result<users::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let mut active: users::ActiveModel = user.into();
        if let Some(password) = changes.password {
            active.password = Set(password);
        }
        if let Some(token) = changes.token {
            active.token = Set(Some(token));
        }
        active.updated_at = Set(now);

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update user")?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    async fn repo() -> UserRepository {
        let store = Store::new("sqlite::memory:")
            .await
            .expect("failed to open store");
        UserRepository::new(store.conn)
    }

    #[tokio::test]
    async fn test_first_match_prefers_lowest_id() {
        let repo = repo().await;
        let first = repo.insert("alice", "one", None).await.unwrap();
        let second = repo.insert("alice", "two", None).await.unwrap();
        assert_ne!(first.id, second.id);

        let found = repo.find_first_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.password, "one");
    }

    #[tokio::test]
    async fn test_soft_deleted_rows_are_hidden() {
        let repo = repo().await;
        let first = repo.insert("bob", "one", None).await.unwrap();
        let second = repo.insert("bob", "two", None).await.unwrap();

        assert!(repo.soft_delete(first.id).await.unwrap());
        assert!(!repo.soft_delete(first.id).await.unwrap());

        let found = repo.find_first_by_username("bob").await.unwrap().unwrap();
        assert_eq!(found.id, second.id);

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, second.id);
    }

    #[tokio::test]
    async fn test_apply_changes_leaves_unset_fields() {
        let repo = repo().await;
        let user = repo
            .insert("carol", "old", Some("tok".to_string()))
            .await
            .unwrap();

        let updated = repo
            .apply_changes(
                user.clone(),
                UserChanges {
                    password: Some("new".to_string()),
                    token: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.password, "new");
        assert_eq!(updated.token.as_deref(), Some("tok"));
        assert_eq!(updated.created_at, user.created_at);
    }
}
