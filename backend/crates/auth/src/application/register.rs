//! Register Use Case
//!
//! Creates a new user account and signs the user in.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::service::AuthService;
use crate::domain::value_object::{email::Email, user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Token and user returned by register and login
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub token: String,
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<U, S>
where
    U: UserRepository,
    S: AuthService,
{
    user_repo: Arc<U>,
    auth_service: Arc<S>,
}

impl<U, S> RegisterUseCase<U, S>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthOutput> {
        // Validate all input before touching the store
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let name = UserName::new(&input.name).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let service = Arc::clone(&self.auth_service);
        let password = tokio::task::spawn_blocking(move || service.hash_password(&raw_password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

        let user = User::new(email, name, password);

        // A concurrent registration can still win the race; the repository
        // reports that as EmailTaken via the unique index.
        self.user_repo.create(&user).await?;

        let token = self.auth_service.generate_token(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User registered"
        );

        Ok(AuthOutput { token, user })
    }
}
