use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::{repo::seaorm::SeaOrmAuthRepository, service::AuthService};
use service::storage::UploadStore;

/// Shared handles injected into every handler through axum `State`.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub uploads: Arc<UploadStore>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth: &configs::AuthConfig, uploads: &configs::UploadConfig) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        Self {
            db,
            auth: Arc::new(AuthService::new(repo, auth.into())),
            uploads: Arc::new(UploadStore::from_config(uploads)),
        }
    }
}
