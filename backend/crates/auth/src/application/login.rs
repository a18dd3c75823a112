//! Login Use Case
//!
//! Authenticates a user by email and password and issues a token.

use std::sync::Arc;

use crate::application::register::AuthOutput;
use crate::domain::repository::UserRepository;
use crate::domain::service::AuthService;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: AuthService,
{
    user_repo: Arc<U>,
    auth_service: Arc<S>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: AuthService,
{
    pub fn new(user_repo: Arc<U>, auth_service: Arc<S>) -> Self {
        Self {
            user_repo,
            auth_service,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::for_login(input.password)?;

        // Unknown email and wrong password share one error and one hash cost
        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            self.verify(raw_password, UserPassword::dummy()).await?;
            tracing::warn!(email = %email, "Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verify(raw_password, user.password.clone()).await? {
            tracing::warn!(user_id = %user.user_id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.auth_service.generate_token(&user)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(AuthOutput { token, user })
    }

    async fn verify(&self, raw: RawPassword, stored: UserPassword) -> AuthResult<bool> {
        let service = Arc::clone(&self.auth_service);
        tokio::task::spawn_blocking(move || service.verify_password(&raw, &stored))
            .await
            .map_err(|e| AuthError::Internal(format!("Password check task failed: {e}")))
    }
}
