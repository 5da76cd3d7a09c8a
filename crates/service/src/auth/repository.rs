use async_trait::async_trait;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, user_id: i32) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, email: &str, name: &str, password_hash: String) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>, // key: email
        creds: Mutex<HashMap<i32, Credentials>>, // key: user_id
    }

    impl MockAuthRepository {
        fn lock<T>(m: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>, AuthError> {
            m.lock().map_err(|e| AuthError::Repository(e.to_string()))
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = Self::lock(&self.users)?;
            Ok(users.get(email.trim()).cloned())
        }

        async fn find_user_by_id(&self, user_id: i32) -> Result<Option<AuthUser>, AuthError> {
            let users = Self::lock(&self.users)?;
            Ok(users.values().find(|u| u.id == user_id).cloned())
        }

        async fn create_user(&self, email: &str, name: &str, password_hash: String) -> Result<AuthUser, AuthError> {
            let mut users = Self::lock(&self.users)?;
            let email = email.trim().to_string();
            if users.contains_key(&email) {
                return Err(AuthError::Conflict);
            }
            let id = users.len() as i32 + 1;
            let user = AuthUser { id, email: email.clone(), name: name.to_string() };
            users.insert(email, user.clone());
            Self::lock(&self.creds)?.insert(id, Credentials { user_id: id, password_hash });
            Ok(user)
        }

        async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
            let creds = Self::lock(&self.creds)?;
            Ok(creds.get(&user_id).cloned())
        }
    }
}
