use sea_orm::DatabaseConnection;

use models::errors::ModelError;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_domain(u: models::user::Model) -> AuthUser {
    AuthUser { id: u.id, email: u.email, name: u.name }
}

fn map_model_err(e: ModelError) -> AuthError {
    match e {
        ModelError::Validation(m) => AuthError::Validation(m),
        // a concurrent registration can slip past the pre-check and hit the unique index
        ModelError::Db(m) if is_unique_violation(&m) => AuthError::Conflict,
        ModelError::Db(m) => AuthError::Repository(m),
    }
}

fn is_unique_violation(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    lower.contains("unique") || lower.contains("duplicate key")
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_email(&self.db, email).await.map_err(map_model_err)?;
        Ok(res.map(to_domain))
    }

    async fn find_user_by_id(&self, user_id: i32) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_id(&self.db, user_id).await.map_err(map_model_err)?;
        Ok(res.map(to_domain))
    }

    async fn create_user(&self, email: &str, name: &str, password_hash: String) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, email, name, password_hash)
            .await
            .map_err(map_model_err)?;
        Ok(to_domain(created))
    }

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
        let res = models::user::find_by_id(&self.db, user_id).await.map_err(map_model_err)?;
        Ok(res.map(|u| Credentials { user_id: u.id, password_hash: u.password_hash }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn duplicate_email_maps_to_conflict() {
        let (db, _dir) = get_db().await.unwrap();
        let repo = SeaOrmAuthRepository::new(db);
        repo.create_user("dup@example.com", "One", "hash-1".into()).await.unwrap();
        let err = repo.create_user("dup@example.com", "Two", "hash-2".into()).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn credentials_come_from_the_user_row() {
        let (db, _dir) = get_db().await.unwrap();
        let repo = SeaOrmAuthRepository::new(db);
        let user = repo.create_user("c@example.com", "C", "stored-hash".into()).await.unwrap();
        let creds = repo.get_credentials(user.id).await.unwrap().unwrap();
        assert_eq!(creds.password_hash, "stored-hash");
        assert!(repo.get_credentials(user.id + 100).await.unwrap().is_none());
    }
}
