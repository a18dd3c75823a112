//! Shared presentation state

use std::sync::Arc;

use axum::http::{HeaderMap, header};

use crate::application::{AuthenticateUseCase, LoginUseCase, RegisterUseCase};
use crate::domain::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::service::AuthService;
use crate::error::{AuthError, AuthResult};
use crate::infra::{JwtAuthService, PgUserRepository};

/// State shared by the bearer middleware and the GraphQL resolvers
pub struct AuthState<U, S> {
    pub users: Arc<U>,
    pub service: Arc<S>,
}

/// Production state
pub type PgAuthState = AuthState<PgUserRepository, JwtAuthService>;

impl<U, S> Clone for AuthState<U, S> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            service: Arc::clone(&self.service),
        }
    }
}

impl<U, S> AuthState<U, S>
where
    U: UserRepository,
    S: AuthService,
{
    pub fn new(users: Arc<U>, service: Arc<S>) -> Self {
        Self { users, service }
    }

    pub fn register(&self) -> RegisterUseCase<U, S> {
        RegisterUseCase::new(Arc::clone(&self.users), Arc::clone(&self.service))
    }

    pub fn login(&self) -> LoginUseCase<U, S> {
        LoginUseCase::new(Arc::clone(&self.users), Arc::clone(&self.service))
    }

    pub fn authenticate(&self) -> AuthenticateUseCase<U, S> {
        AuthenticateUseCase::new(Arc::clone(&self.users), Arc::clone(&self.service))
    }

    /// Resolve the `Authorization: Bearer` header into a principal
    ///
    /// `Ok(None)` when the header is absent or not a bearer credential.
    pub async fn principal_from_headers(
        &self,
        headers: &HeaderMap,
    ) -> AuthResult<Option<Principal>> {
        let Some(token) = bearer_token(headers) else {
            return Ok(None);
        };

        match self.authenticate().execute(token).await {
            Ok(principal) => Ok(Some(principal)),
            Err(AuthError::Unauthenticated) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme == "Bearer" && !token.is_empty()).then_some(token)
}
