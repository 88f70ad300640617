use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService, SessionTokens};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tokens: Arc<SessionTokens>,

    pub auth: Arc<dyn AuthService>,
}

impl SharedState {
    /// Validates the config, opens the database (running migrations) and
    /// wires the services. Fails if the session secret is missing or weak.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let tokens = Arc::new(
            SessionTokens::from_config(&config.security)
                .map_err(|e| anyhow::anyhow!("Failed to initialize session tokens: {e}"))?,
        );

        let auth = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            tokens.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens,
            auth,
        })
    }
}
