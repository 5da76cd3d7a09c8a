/// CRUD operations tests for all models
pub mod crud_tests;

use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use crate::db::{connect_with_config, migrate, DatabaseConfig};

/// Fresh migrated SQLite database inside a temp dir; keep the `TempDir` alive for the test.
pub async fn setup_test_db() -> anyhow::Result<(DatabaseConnection, TempDir)> {
    let dir = tempfile::tempdir()?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("models.db").display()),
        max_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok((db, dir))
}
