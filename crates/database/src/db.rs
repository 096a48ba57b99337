use crate::config::Config;
use log::{LevelFilter, info};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};

/// Creates a database connection
pub async fn create_connection(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.as_str());
    options.sqlx_logging_level(LevelFilter::Debug);

    if let Some(max_connections) = config.max_connections {
        options.max_connections(max_connections);
    }

    let db = Database::connect(options).await?;
    info!("Connected to {:?} database", db.get_database_backend());

    Ok(db)
}
