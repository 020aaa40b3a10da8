pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./voltix.db?mode=rwc";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./voltix.db?mode=rwc")
    pub url: String,
    /// Pool size cap; the driver default is used when unset
    pub max_connections: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: None,
        }
    }
}

impl DatabaseConfig {
    /// Private SQLite database living as long as its single connection
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        }
    }

    /// Pool size to request, at least one connection when set
    pub fn pool_size(&self) -> Option<u32> {
        self.max_connections.map(|max| max.max(1))
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut options = ConnectOptions::new(config.url.clone());
    if let Some(max) = config.pool_size() {
        options.max_connections(max).min_connections(1);
    }
    options.sqlx_logging(false);
    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}
