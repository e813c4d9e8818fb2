use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenPair;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Domain service implementation for the credential lifecycle.
///
/// Holds no mutable state: the signing secret lives inside the shared
/// [`Authenticator`], users live in the repository.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `authenticator` - Password hashing and token signing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

fn store_failure(err: UserError) -> AuthError {
    tracing::error!("Credential store failure: {}", err);
    AuthError::Internal(err.to_string())
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserProfile, AuthError> {
        match self.repository.find_by_email(command.email.as_str()).await {
            Ok(Some(_)) => {
                tracing::warn!(email = %command.email, "Registration rejected: email taken");
                return Err(AuthError::UserAlreadyExists(command.email.to_string()));
            }
            Ok(None) => {}
            Err(e) => {
                // The unique constraint still guards the insert below.
                tracing::warn!(email = %command.email, "Existence check failed: {}", e);
            }
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| {
                tracing::error!("Password hashing failed: {}", e);
                AuthError::Internal(format!("Password hashing failed: {}", e))
            })?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.repository.create(user).await.map_err(|e| match e {
            UserError::EmailAlreadyExists(email) => {
                tracing::warn!(email = %email, "Registration rejected: email taken");
                AuthError::UserAlreadyExists(email)
            }
            other => store_failure(other),
        })?;

        tracing::info!(user_id = %created.id, "User registered");

        Ok(created.into())
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        if EmailAddress::new(command.email.clone()).is_err() {
            self.authenticator.verify_decoy(&command.password);
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .repository
            .find_by_email(&command.email)
            .await
            .map_err(store_failure)?;

        let Some(user) = user else {
            tracing::warn!(email = %command.email, "Login failed: unknown email");
            self.authenticator.verify_decoy(&command.password);
            return Err(AuthError::InvalidCredentials);
        };

        let tokens = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                user.id,
                user.email.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login failed: wrong password");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::PasswordError(e) => {
                    tracing::error!(user_id = %user.id, "Stored password hash unusable: {}", e);
                    AuthError::Internal(e.to_string())
                }
                AuthenticationError::JwtError(e) => e.into(),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user: user.into(),
            tokens,
        })
    }

    fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        Ok(self
            .authenticator
            .issue_token_pair(user.id, user.email.as_str())?)
    }

    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        Ok(self.authenticator.validate_access_token(token)?)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.authenticator.validate_refresh_token(refresh_token)?;

        let user_id = UserId::from_string(&claims.user_id).map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Refresh rejected: user no longer exists");
                AuthError::InvalidToken
            })?;

        self.generate_token_pair(&user)
    }
}
