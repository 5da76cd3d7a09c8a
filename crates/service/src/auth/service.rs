use std::sync::Arc;
use std::time::Duration;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{RegisterInput, LoginInput, AuthUser, AuthSession, Identity};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token::{bearer_token, TokenKeys};

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Option<Duration>,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.jwt_secret.clone(), token_ttl: c.token_ttl_secs.map(Duration::from_secs) }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    keys: TokenKeys,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        let keys = TokenKeys::new(&cfg.jwt_secret, cfg.token_ttl);
        Self { repo, keys }
    }

    /// Register a new user with a hashed password and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl: None });
    /// let input = RegisterInput { email: "user@example.com".into(), name: "Test".into(), password: "Secret123".into() };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "user@example.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        if input.password.is_empty() {
            return Err(AuthError::Validation("password is required".into()));
        }
        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = self.repo.create_user(&input.email, &input.name, hash).await?;
        let token = self.keys.issue(user.id)?;
        info!(user_id = user.id, email = %user.email, "user_registered");
        Ok(AuthSession { user, token })
    }

    /// Authenticate a user and issue a token.
    ///
    /// Unknown email and wrong password fail identically.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig { jwt_secret: "secret".into(), token_ttl: None });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), name: "N".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let token = self.keys.issue(user.id)?;
        info!(user_id = user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Resolve an `Authorization` header value to the caller's identity.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, AuthError> {
        let token = bearer_token(authorization)?;
        let user_id = self.keys.verify(token)?;
        Ok(Identity { user_id })
    }

    /// Look up the profile behind a verified identity.
    pub async fn current_user(&self, identity: Identity) -> Result<AuthUser, AuthError> {
        self.repo
            .find_user_by_id(identity.user_id)
            .await?
            .ok_or(AuthError::NotFound)
    }
}
