#![cfg(test)]
use sea_orm::DatabaseConnection;
use tempfile::TempDir;
use models::db::{connect_with_config, migrate, DatabaseConfig};

/// Migrated SQLite database in a fresh temp dir. Drop the `TempDir` last.
pub async fn get_db() -> Result<(DatabaseConnection, TempDir), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("service.db").display()),
        max_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok((db, dir))
}
