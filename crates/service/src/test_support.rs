#![cfg(test)]
use sea_orm::DatabaseConnection;

/// Each call yields an isolated, migrated in-memory database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}
