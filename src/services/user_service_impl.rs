//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Store;
use crate::models::user::{PublicUser, User, UserPayload};
use crate::services::token::TokenIssuer;
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    tokens: TokenIssuer,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    async fn find_first(&self, username: &str) -> Result<crate::entities::users::Model, UserError> {
        self.store
            .find_user_by_username(username)
            .await
            .map_err(|e| UserError::storage(&e))?
            .ok_or_else(UserError::user_not_found)
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn create(&self, payload: UserPayload) -> Result<String, UserError> {
        let token = self.tokens.issue(&payload.username, &payload.password)?;

        let user = self
            .store
            .insert_user(&payload.username, &payload.password, Some(token.clone()))
            .await
            .map_err(|e| UserError::storage(&e))?;

        info!(user_id = user.id, username = %user.username, "User created");

        Ok(token)
    }

    async fn delete_by_username(&self, username: &str) -> Result<(), UserError> {
        let user = self.find_first(username).await?;

        let deleted = self
            .store
            .delete_user(user.id)
            .await
            .map_err(|e| UserError::storage(&e))?;

        // Lost a race with a concurrent delete
        if !deleted {
            return Err(UserError::user_not_found());
        }

        info!(user_id = user.id, username = %user.username, "User deleted");

        Ok(())
    }

    async fn update_by_username(&self, payload: UserPayload) -> Result<User, UserError> {
        let user = self.find_first(&payload.username).await?;
        let changes = payload.changes();

        debug!(
            user_id = user.id,
            password = changes.password.is_some(),
            token = changes.token.is_some(),
            "Applying user changes"
        );

        let updated = self
            .store
            .update_user(user, changes)
            .await
            .map_err(|e| UserError::storage(&e))?;

        Ok(User::from(updated))
    }

    async fn get_by_username(&self, username: &str) -> Result<PublicUser, UserError> {
        let user = self.find_first(username).await?;
        Ok(PublicUser::from(User::from(user)))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let users = self
            .store
            .list_users()
            .await
            .map_err(|e| UserError::storage(&e))?;

        debug!(count = users.len(), "Listed users");

        Ok(users.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::ConnectionTrait;

    async fn service() -> (SeaOrmUserService, TokenIssuer) {
        let store = Store::new("sqlite::memory:")
            .await
            .expect("failed to open store");
        let tokens = TokenIssuer::new("service-secret", Duration::hours(24));
        (SeaOrmUserService::new(store, tokens.clone()), tokens)
    }

    async fn break_storage(service: &SeaOrmUserService) {
        service
            .store
            .conn
            .execute_unprepared("DROP TABLE users")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_token() {
        let (service, tokens) = service().await;

        let token = service
            .create(UserPayload::new("alice", "pw"))
            .await
            .unwrap();
        assert!(!token.is_empty());

        let user = service.get_by_username("alice").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.token.as_deref(), Some(token.as_str()));

        let claims = tokens.decode(&token).unwrap();
        assert_eq!(claims.password, "pw");
    }

    #[tokio::test]
    async fn test_duplicate_usernames_both_listed() {
        let (service, _) = service().await;

        service.create(UserPayload::new("dup", "one")).await.unwrap();
        service.create(UserPayload::new("dup", "two")).await.unwrap();

        let users = service.list_all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_ne!(users[0].id, users[1].id);
        assert!(users.iter().all(|u| u.username == "dup"));

        let first = service.get_by_username("dup").await.unwrap();
        assert_eq!(first.id, users[0].id);
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let (service, _) = service().await;

        let token = service
            .create(UserPayload::new("alice", "old"))
            .await
            .unwrap();
        let before = service.get_by_username("alice").await.unwrap();

        let updated = service
            .update_by_username(UserPayload::new("alice", "new"))
            .await
            .unwrap();

        assert_eq!(updated.id, before.id);
        assert_eq!(updated.password, "new");
        assert_eq!(updated.token.as_deref(), Some(token.as_str()));
    }

    #[tokio::test]
    async fn test_update_cannot_clear_password() {
        let (service, _) = service().await;
        service
            .create(UserPayload::new("alice", "keep"))
            .await
            .unwrap();

        let updated = service
            .update_by_username(UserPayload::new("alice", ""))
            .await
            .unwrap();
        assert_eq!(updated.password, "keep");
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let (service, _) = service().await;

        assert!(matches!(
            service.get_by_username("ghost").await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_by_username("ghost").await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            service
                .update_by_username(UserPayload::new("ghost", "pw"))
                .await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (service, _) = service().await;
        service.create(UserPayload::new("alice", "pw")).await.unwrap();

        service.delete_by_username("alice").await.unwrap();

        assert!(matches!(
            service.get_by_username("alice").await,
            Err(UserError::NotFound(_))
        ));
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failures_surface_as_storage_errors() {
        let (service, _) = service().await;
        service.create(UserPayload::new("alice", "pw")).await.unwrap();

        break_storage(&service).await;

        match service.list_all().await {
            Err(UserError::Storage(msg)) => assert!(msg.contains("Failed to list users")),
            other => panic!("expected storage error, got {other:?}"),
        }
        assert!(matches!(
            service.create(UserPayload::new("bob", "pw")).await,
            Err(UserError::Storage(_))
        ));
        assert!(matches!(
            service.get_by_username("alice").await,
            Err(UserError::Storage(_))
        ));
    }
}
