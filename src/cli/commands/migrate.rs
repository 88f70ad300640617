//! Migrate command handler

use crate::config::Config;
use crate::db::Store;

/// Opening the store applies every pending migration.
pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_url).await?;
    store.ping().await?;

    println!("Database is up to date: {}", config.general.database_url);
    Ok(())
}
