//! Authenticate Use Case
//!
//! Resolves a bearer token into the calling user.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::service::AuthService;
use crate::error::{AuthError, AuthResult};

/// Authenticate use case
pub struct AuthenticateUseCase<U, S>
where
    U: UserRepository,
    S: AuthService,
{
    user_repo: Arc<U>,
    auth_service: Arc<S>,
}

impl<U, S> AuthenticateUseCase<U, S>
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

    /// Verify the token and load its user
    ///
    /// Every failure (bad signature, expiry, malformed subject, deleted user)
    /// is reported as `Unauthenticated`. Database failures propagate.
    pub async fn execute(&self, token: &str) -> AuthResult<Principal> {
        let claims = self.auth_service.verify_token(token)?;

        let user_id = UserId::parse_str(&claims.user_id).map_err(|_| {
            tracing::debug!("Token subject is not a valid user id");
            AuthError::Unauthenticated
        })?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(Principal::from(&user))
    }

    /// Load the full user record for an authenticated caller
    pub async fn current_user(&self, principal: &Principal) -> AuthResult<User> {
        self.user_repo
            .find_by_id(&principal.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }
}
