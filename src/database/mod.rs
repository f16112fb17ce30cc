use crate::config::Config;
use log::{info, warn};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database as SeaDatabase;
use std::{
    fs::{create_dir_all, File},
    path::Path,
};

pub mod entities;
mod migration;

// Re-exports of database types
pub use sea_orm::DatabaseConnection;
pub use sea_orm::DbErr;

/// Connects to the database file from the config, creating it and
/// applying any pending migrations
///
/// `config` The config containing the database file path
pub async fn init(config: &Config) -> DatabaseConnection {
    let path = Path::new(&config.database_file);

    // Create path to database file if missing
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            create_dir_all(parent).expect("Unable to create parent directory for sqlite database");
        }
    }

    // Create the database if file is missing
    if !path.exists() {
        File::create(path).expect("Unable to create sqlite database file");
    }

    let url = format!("sqlite:{}", config.database_file);
    let connection = SeaDatabase::connect(url)
        .await
        .expect("Unable to create database connection");

    migrate(&connection).await;

    info!("Connected to database ({})", config.database_file);

    connection
}

/// Runs the pending migrations against the provided connection
async fn migrate(connection: &DatabaseConnection) {
    if let Err(err) = Migrator::up(connection, None).await {
        if let DbErr::Custom(custom_err) = err {
            if custom_err
                .contains("is missing, this migration has been applied but its file is missing")
            {
                // Forward migrations are not always a failure, so its just a warning
                warn!(
                    "It looks like your app.db has been used with a newer version \
                    of the server, you may encounter unexpected issues: {}",
                    custom_err
                )
            }
        } else {
            // Other errors should be considered fatal
            panic!("Failed to run database migrations: {}", err);
        }
    }
}

/// Creates a migrated in-memory database. A single pooled connection is
/// used so every query sees the same database.
#[cfg(test)]
pub async fn test_connection() -> DatabaseConnection {
    use sea_orm::ConnectOptions;

    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let connection = SeaDatabase::connect(options)
        .await
        .expect("Unable to create test database");
    migrate(&connection).await;
    connection
}
