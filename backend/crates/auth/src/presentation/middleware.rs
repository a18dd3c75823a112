//! Auth Middleware
//!
//! Middleware for requiring a bearer token on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::repository::UserRepository;
use crate::domain::service::AuthService;
use crate::error::AuthError;
use crate::presentation::state::{AuthState, bearer_token};

/// Middleware that requires a valid bearer token
///
/// On success the [`Principal`](crate::domain::principal::Principal) is
/// stored in the request extensions for downstream handlers.
pub async fn require_bearer<U, S>(
    State(state): State<AuthState<U, S>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    U: UserRepository + Send + Sync + 'static,
    S: AuthService,
{
    let token = bearer_token(req.headers())
        .ok_or(AuthError::Unauthenticated)?
        .to_owned();
    let principal = state.authenticate().execute(&token).await?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
