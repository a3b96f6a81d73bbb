use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{SeaOrmUserService, TokenIssuer, UserService};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tokens: TokenIssuer,

    pub user_service: Arc<dyn UserService>,
}

impl SharedState {
    /// Validates `config`, opens the store and wires the services together.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let tokens = TokenIssuer::from_config(&config.security);

        let user_service = Arc::new(SeaOrmUserService::new(store.clone(), tokens.clone()))
            as Arc<dyn UserService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens,
            user_service,
        })
    }
}
